use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece(pub Color, pub Role);

impl Piece {
    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.0
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.1
    }
}

/// White pieces are printed in uppercase, black pieces in lowercase.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut buffer = String::with_capacity(1);
        write!(buffer, "{}", self.role())?;

        match self.color() {
            Color::White => f.write_str(&buffer.to_uppercase()),
            Color::Black => f.write_str(&buffer),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() {
            return Err(ParsePieceError);
        }

        let role = s.to_ascii_lowercase().parse().map_err(|_| ParsePieceError)?;

        if s.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Piece(Color::White, role))
        } else {
            Ok(Piece(Color::Black, role))
        }
    }
}
