use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "checkmate by the {} player", _0)]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by insufficient material")]
    DrawByInsufficientMaterial,

    #[display(fmt = "draw by the 50-move rule")]
    DrawBy50MoveRule,
}

impl Outcome {
    /// Whether the outcome is a [draw] and neither side has won.
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is a decisive and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            _ => None,
        }
    }
}

/// The state of a game as seen by its players.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    #[display(fmt = "playing")]
    Playing,
    #[display(fmt = "white won")]
    WhiteWon,
    #[display(fmt = "black won")]
    BlackWon,
    #[display(fmt = "draw")]
    Draw,
}

impl Status {
    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        *self != Status::Playing
    }
}

impl From<Option<Outcome>> for Status {
    fn from(outcome: Option<Outcome>) -> Self {
        match outcome.map(|o| o.winner()) {
            None => Status::Playing,
            Some(Some(Color::White)) => Status::WhiteWon,
            Some(Some(Color::Black)) => Status::BlackWon,
            Some(None) => Status::Draw,
        }
    }
}
