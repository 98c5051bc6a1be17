/// The rules of chess.
pub mod chess;
