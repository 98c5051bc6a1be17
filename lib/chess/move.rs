use crate::chess::{ParseSquareError, Promotion, Square};
use derive_more::{DebugCustom, Display, Error, From};
use std::str::FromStr;

/// A chess move, printed in [pure coordinate notation].
///
/// Besides its source and destination squares, a move records whether it is a castling move,
/// whether it captures en passant, and what a promoting pawn turns into.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}{}", whence, whither, promotion)]
pub struct Move {
    whence: Square,
    whither: Square,
    promotion: Promotion,
    castling: bool,
    en_passant: bool,
}

impl Move {
    /// Constructs a regular [`Move`].
    #[inline(always)]
    pub fn new(whence: Square, whither: Square) -> Self {
        Move {
            whence,
            whither,
            promotion: Promotion::None,
            castling: false,
            en_passant: false,
        }
    }

    /// Constructs a pawn [`Move`] that promotes on arrival.
    #[inline(always)]
    pub fn promotion(whence: Square, whither: Square, promotion: Promotion) -> Self {
        Move {
            promotion,
            ..Move::new(whence, whither)
        }
    }

    /// Constructs a castling [`Move`], described by the king's displacement.
    #[inline(always)]
    pub fn castling(whence: Square, whither: Square) -> Self {
        Move {
            castling: true,
            ..Move::new(whence, whither)
        }
    }

    /// Constructs an en passant capture.
    #[inline(always)]
    pub fn en_passant(whence: Square, whither: Square) -> Self {
        Move {
            en_passant: true,
            ..Move::new(whence, whither)
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The [`Promotion`] specifier.
    #[inline(always)]
    pub fn promotion_target(&self) -> Promotion {
        self.promotion
    }

    /// Whether this is a promotion move.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion != Promotion::None
    }

    /// Whether this is a castling move.
    #[inline(always)]
    pub fn is_castling(&self) -> bool {
        self.castling
    }

    /// Whether this is an en passant capture.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    /// The square of the pawn captured en passant, if this is an en passant capture.
    #[inline(always)]
    pub fn en_passant_victim(&self) -> Option<Square> {
        self.en_passant
            .then(|| Square::new(self.whither.file(), self.whence.rank()))
    }

    /// Whether this move and `other` denote the same displacement and promotion.
    ///
    /// Castling and en passant flags are derived from the position, so they are ignored.
    #[inline(always)]
    pub fn matches(&self, other: &Move) -> bool {
        (self.whence, self.whither, self.promotion) == (other.whence, other.whither, other.promotion)
    }
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "failed to parse move")]
    InvalidPromotion,
}

/// Parses [pure coordinate notation], which never carries castling or en passant flags.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut boundaries = s.char_indices().map(|(i, _)| i).chain([s.len()]);
        let i = boundaries.nth(2).unwrap_or(s.len());
        let j = boundaries.nth(1).unwrap_or(s.len());

        let whence = s[..i].parse()?;
        let whither = s[i..j].parse()?;
        let promotion = s[j..]
            .parse()
            .map_err(|_| ParseMoveError::InvalidPromotion)?;

        Ok(Move::promotion(whence, whither, promotion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_serializes_to_pure_coordinate_notation(a: Square, b: Square, p: Promotion) {
        assert_eq!(
            Move::promotion(a, b, p).to_string(),
            format!("{}{}{}", a, b, p)
        );
    }

    #[proptest]
    fn parsing_printed_move_is_an_identity(a: Square, b: Square, p: Promotion) {
        let m = Move::promotion(a, b, p);
        assert_eq!(m.to_string().parse(), Ok(m));
    }

    #[proptest]
    fn parsing_move_fails_for_invalid_promotion(
        a: Square,
        b: Square,
        #[filter(!"nbrq".contains(#c))] c: char,
    ) {
        assert_eq!(
            format!("{}{}{}", a, b, c).parse::<Move>(),
            Err(ParseMoveError::InvalidPromotion)
        );
    }

    #[proptest]
    fn parsing_move_fails_for_invalid_squares(#[strategy("[i-z][09]{3}")] s: String) {
        assert!(matches!(
            s.parse::<Move>(),
            Err(ParseMoveError::InvalidSquare(_))
        ));
    }

    #[proptest]
    fn matching_ignores_special_move_flags(a: Square, b: Square) {
        assert!(Move::castling(a, b).matches(&Move::new(a, b)));
        assert!(Move::en_passant(a, b).matches(&Move::new(a, b)));
        assert_ne!(Move::castling(a, b), Move::new(a, b));
    }

    #[proptest]
    fn only_en_passant_captures_have_a_victim(a: Square, b: Square) {
        assert_eq!(Move::new(a, b).en_passant_victim(), None);
        assert_eq!(
            Move::en_passant(a, b).en_passant_victim(),
            Some(Square::new(b.file(), a.rank()))
        );
    }

    #[test]
    fn en_passant_victim_is_beside_the_capturing_pawn() {
        let m = Move::en_passant(Square::E5, Square::D6);
        assert_eq!(m.en_passant_victim(), Some(Square::D5));
    }
}
