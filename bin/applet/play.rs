use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::Game;
use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};
use tracing::{info, instrument};

/// Plays one game in which both sides pick uniformly among their legal moves.
///
/// The board is printed after every ply, followed by the status and how the game ended.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Seed for the random move picker, drawn at random if omitted.
    #[clap(short, long)]
    seed: Option<u64>,

    /// Stop after this many plies even if the game hasn't ended.
    #[clap(short, long)]
    plies: Option<u32>,

    /// Only print the result.
    #[clap(short, long)]
    quiet: bool,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        info!(seed, "starting a new game");

        if !self.quiet {
            println!("{}\n", game.position());
        }

        while !game.status().is_over() {
            if self.plies.is_some_and(|n| game.position().plies() >= n) {
                break;
            }

            let m = *game
                .moves()
                .choose(&mut rng)
                .context("no legal moves in an ongoing game")?;

            let played = game.play(m)?;

            if !self.quiet {
                let check = if game.is_check() { " check!" } else { "" };
                println!("{} played {}{}", !game.turn(), played, check);
                println!("{}\n", game.position());
            }
        }

        match game.outcome() {
            Some(o) => println!("{} ({}) after {} plies", game.status(), o, game.position().plies()),
            None => println!("{} after {} plies", game.status(), game.position().plies()),
        }

        Ok(())
    }
}
