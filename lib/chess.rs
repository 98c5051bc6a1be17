mod board;
mod color;
mod file;
mod game;
mod r#move;
mod outcome;
mod piece;
mod position;
mod promotion;
mod rank;
mod role;
mod square;

/// Attack sets and pseudo-legal move generation.
pub mod movegen;

pub use board::*;
pub use color::*;
pub use file::*;
pub use game::*;
pub use movegen::{PieceMoves, Squares};
pub use outcome::*;
pub use piece::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use square::*;
