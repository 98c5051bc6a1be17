use crate::chess::{Color, File, Piece, Rank, Role, Square};
use std::fmt::{self, Write};
use std::ops::Index;

/// The pieces of the back rank, from the a-file to the h-file.
const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// The chess board.
///
/// Every square holds either nothing or a [`Piece`], alongside a flag that records whether that
/// piece has moved since the game started.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    pieces: [Option<Piece>; 64],
    moved: [bool; 64],
}

/// The standard starting position.
impl Default for Board {
    fn default() -> Self {
        let mut board = Board::empty();

        for side in Color::iter() {
            let back = Rank::First.relative_to(side);
            let pawns = Rank::Second.relative_to(side);

            for (f, role) in File::iter().zip(BACK_RANK) {
                board.pieces[Square::new(f, back).index()] = Some(Piece(side, role));
                board.pieces[Square::new(f, pawns).index()] = Some(Piece(side, Role::Pawn));
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board {
            pieces: [None; 64],
            moved: [false; 64],
        }
    }

    /// The [`Piece`] on the given zero-based coordinates, if any.
    ///
    /// Coordinates outside of the board hold no piece.
    #[inline(always)]
    pub fn get(&self, file: i8, rank: i8) -> Option<Piece> {
        Square::from_coords(file, rank).and_then(|sq| self[sq])
    }

    /// Whether the piece on the given [`Square`] has moved since the start of the game.
    #[inline(always)]
    pub fn has_moved(&self, sq: Square) -> bool {
        self.moved[sq.index()]
    }

    /// [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.iter()
            .find(|&(p, _)| p == Piece(side, Role::King))
            .map(|(_, sq)| sq)
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self[sq]?, sq)))
    }

    /// The number of occupied squares.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pieces.iter().flatten().count()
    }

    /// Whether there are no pieces on the board.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the piece on a square, if any.
    #[inline(always)]
    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.moved[sq.index()] = false;
        self.pieces[sq.index()].take()
    }

    /// Places a piece on a square and marks it as moved, replacing whatever was there.
    #[inline(always)]
    pub(crate) fn put(&mut self, p: Piece, sq: Square) {
        self.moved[sq.index()] = true;
        self.pieces[sq.index()] = Some(p);
    }
}

/// Whether a piece standing on this square could still be on its starting square.
fn is_home(Piece(side, role): Piece, sq: Square) -> bool {
    let rank = sq.rank().relative_to(side);
    match role {
        Role::Pawn => rank == Rank::Second,
        Role::King => rank == Rank::First && sq.file() == File::E,
        Role::Rook => rank == Rank::First && matches!(sq.file(), File::A | File::H),
        Role::Knight | Role::Bishop | Role::Queen => true,
    }
}

/// Sets up a board from scratch.
///
/// Pawns, kings and rooks found away from their starting squares are considered to have moved.
impl FromIterator<(Square, Piece)> for Board {
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(iter: I) -> Self {
        let mut board = Board::empty();

        for (sq, p) in iter {
            board.pieces[sq.index()] = Some(p);
            board.moved[sq.index()] = !is_home(p, sq);
        }

        board
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.pieces[sq.index()]
    }
}

/// Draws the board from White's point of view.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in Rank::iter().rev() {
            write!(f, "{} ", r)?;

            for file in File::iter() {
                f.write_char(' ')?;
                match self[Square::new(file, r)] {
                    None => f.write_char('.')?,
                    Some(p) => write!(f, "{}", p)?,
                }
            }

            f.write_char('\n')?;
        }

        f.write_str("  ")?;
        for file in File::iter() {
            write!(f, " {}", file)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn starting_position_has_the_standard_material() {
        let board = Board::default();
        let count = |r| board.iter().filter(|(p, _)| p.role() == r).count();

        assert_eq!(board.len(), 32);
        assert_eq!(count(Role::Pawn), 16);
        assert_eq!(count(Role::Rook), 4);
        assert_eq!(count(Role::Bishop), 4);
        assert_eq!(count(Role::Knight), 4);
        assert_eq!(count(Role::Queen), 2);
        assert_eq!(count(Role::King), 2);
    }

    #[test]
    fn starting_position_places_pieces_on_their_home_squares() {
        let board = Board::default();

        for (f, role) in File::iter().zip(BACK_RANK) {
            assert_eq!(
                board[Square::new(f, Rank::First)],
                Some(Piece(Color::White, role))
            );
            assert_eq!(
                board[Square::new(f, Rank::Second)],
                Some(Piece(Color::White, Role::Pawn))
            );
            assert_eq!(
                board[Square::new(f, Rank::Seventh)],
                Some(Piece(Color::Black, Role::Pawn))
            );
            assert_eq!(
                board[Square::new(f, Rank::Eighth)],
                Some(Piece(Color::Black, role))
            );
        }

        for r in [Rank::Third, Rank::Fourth, Rank::Fifth, Rank::Sixth] {
            for f in File::iter() {
                assert_eq!(board[Square::new(f, r)], None);
            }
        }

        assert_eq!(board.king(Color::White), Some(Square::E1));
        assert_eq!(board.king(Color::Black), Some(Square::E8));
    }

    #[proptest]
    fn no_piece_has_moved_in_the_starting_position(sq: Square) {
        assert!(!Board::default().has_moved(sq));
    }

    #[proptest]
    fn get_agrees_with_indexing_by_square(sq: Square) {
        let board = Board::default();
        assert_eq!(board.get(sq.file().index(), sq.rank().index()), board[sq]);
    }

    #[proptest]
    fn get_returns_no_piece_outside_of_the_board(
        f: i8,
        #[filter(!(0..8).contains(&#f) || !(0..8).contains(&#r))] r: i8,
    ) {
        assert_eq!(Board::default().get(f, r), None);
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(sq: Square) {
        let board = Board::default();
        for (p, sq) in board.iter() {
            assert_eq!(board[sq], Some(p));
        }

        assert_eq!(board.iter().any(|(_, s)| s == sq), board[sq].is_some());
    }

    #[proptest]
    fn take_empties_the_square(sq: Square) {
        let mut board = Board::default();
        let p = board[sq];
        assert_eq!(board.take(sq), p);
        assert_eq!(board[sq], None);
        assert!(!board.has_moved(sq));
    }

    #[proptest]
    fn put_marks_the_piece_as_moved(p: Piece, sq: Square) {
        let mut board = Board::empty();
        board.put(p, sq);
        assert_eq!(board[sq], Some(p));
        assert!(board.has_moved(sq));
    }

    #[test]
    fn pieces_placed_away_from_home_are_considered_to_have_moved() {
        let board = Board::from_iter([
            (Square::E1, Piece(Color::White, Role::King)),
            (Square::H1, Piece(Color::White, Role::Rook)),
            (Square::E4, Piece(Color::White, Role::Pawn)),
            (Square::G8, Piece(Color::Black, Role::King)),
            (Square::A7, Piece(Color::Black, Role::Pawn)),
            (Square::B8, Piece(Color::Black, Role::Rook)),
        ]);

        assert!(!board.has_moved(Square::E1));
        assert!(!board.has_moved(Square::H1));
        assert!(board.has_moved(Square::E4));
        assert!(board.has_moved(Square::G8));
        assert!(!board.has_moved(Square::A7));
        assert!(board.has_moved(Square::B8));
    }

    #[test]
    fn board_is_drawn_from_whites_point_of_view() {
        let diagram = Board::default().to_string();
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[1], "7  p p p p p p p p");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
