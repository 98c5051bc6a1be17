use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod play;

/// The demos the command line can run.
#[derive(From, Subcommand)]
pub enum Applet {
    /// Plays a game of random legal moves from the starting position, printing every board.
    Play(play::Play),
}

/// Without a subcommand, a single random game is played.
impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => Ok(a.execute()?),
        }
    }
}
