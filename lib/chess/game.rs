use crate::chess::{Color, IllegalMove, Move, Moves, Outcome, Piece, PieceMoves, Position};
use crate::chess::{Square, Status};
use derive_more::{Display, Error, From};
use tracing::{debug, instrument};

/// The reason why a [`Move`] was rejected by a [`Game`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum GameError {
    #[display(fmt = "the game has ended in a {}", _0)]
    #[from(ignore)]
    GameOver(#[error(not(source))] Outcome),

    #[display(fmt = "there is no piece of the side to move on `{}`", _0)]
    #[from(ignore)]
    NotYourPiece(#[error(not(source))] Square),

    #[display(fmt = "{}", _0)]
    IllegalMove(IllegalMove),
}

/// A game of chess between two players.
///
/// The game keeps the legal moves of the side to move at hand and records the [`Outcome`] as
/// soon as the game ends, after which no more moves are accepted.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    position: Position,
    moves: Moves,
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Position::default().into()
    }
}

impl From<Position> for Game {
    fn from(position: Position) -> Self {
        let moves = position.moves();
        let outcome = position.conclude(!moves.is_empty());

        Game {
            position,
            moves,
            outcome,
        }
    }
}

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current [`Position`].
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The [`Piece`] on the given zero-based coordinates, if any.
    pub fn piece_at(&self, file: i8, rank: i8) -> Option<Piece> {
        self.position.board().get(file, rank)
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The current [`Status`].
    pub fn status(&self) -> Status {
        self.outcome.into()
    }

    /// The legal moves of the side to move.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The legal moves of the piece on this [`Square`].
    pub fn moves_from(&self, sq: Square) -> PieceMoves {
        self.moves
            .iter()
            .filter(|m| m.whence() == sq)
            .copied()
            .collect()
    }

    /// Plays a [`Move`] on behalf of the side to move.
    ///
    /// On success, returns the move as it was played, with castling and en passant resolved.
    /// Rejected moves leave the game unchanged.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play(&mut self, m: Move) -> Result<Move, GameError> {
        if let Some(o) = self.outcome {
            return Err(GameError::GameOver(o));
        }

        let whence = m.whence();
        if self.position[whence].map(|p| p.color()) != Some(self.turn()) {
            return Err(GameError::NotYourPiece(whence));
        }

        let legal = *self
            .moves
            .iter()
            .find(|l| l.matches(&m))
            .ok_or(IllegalMove(m))?;

        self.position.apply(legal);
        self.moves = self.position.moves();
        self.outcome = self.position.conclude(!self.moves.is_empty());

        if let Some(o) = self.outcome {
            debug!(outcome = %o, plies = self.position.plies(), "game over");
        }

        Ok(legal)
    }
}
