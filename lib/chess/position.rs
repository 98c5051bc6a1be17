use crate::chess::movegen::{self, PieceMoves, Squares};
use crate::chess::{Board, Color, File, Move, Outcome, Piece, Rank, Role, Square};
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use proptest::prelude::*;
use proptest::sample::Selector;
use std::{fmt, ops::Index};

/// All legal moves in a position.
pub type Moves = ArrayVec<Move, 256>;

/// The number of halfmoves without captures or pawn moves after which the game is drawn.
pub const FIFTY_MOVE_RULE: u32 = 100;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in this position", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// The reason why a [`Board`] does not make a valid [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "at least one side has more material than a game of chess can produce")]
    TooMuchMaterial,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
}

/// The current position on the chess board.
///
/// Besides the [`Board`], a position knows whose turn it is, how many halfmoves were played since
/// the last capture or pawn move, and which square, if any, may be captured onto en passant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    board: Board,
    plies: u32,
    halfmoves: u32,
    en_passant: Option<Square>,
}

/// The standard starting position.
impl Default for Position {
    fn default() -> Self {
        Position {
            board: Board::default(),
            plies: 0,
            halfmoves: 0,
            en_passant: None,
        }
    }
}

impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    /// Positions reached by playing random legal moves from the starting position.
    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..64usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut pos = Position::default();

                for _ in 0..plies {
                    if pos.outcome().is_some() {
                        break;
                    }

                    let m = selector.select(pos.moves());
                    pos.apply(m);
                }

                pos
            })
            .boxed()
    }
}

impl Position {
    /// Sets up a [`Position`] from a [`Board`] with `turn` to move.
    ///
    /// Both sides must have exactly one king, no pawn may stand on either back rank, no side may
    /// have more material than promotions could have produced, and the side not to move must not
    /// be in check.
    pub fn new(board: Board, turn: Color) -> Result<Self, IllegalPosition> {
        for side in Color::iter() {
            let kings = board
                .iter()
                .filter(|&(p, _)| p == Piece(side, Role::King))
                .count();

            match kings {
                0 => return Err(IllegalPosition::MissingKing),
                1 => {}
                _ => return Err(IllegalPosition::TooManyKings),
            }
        }

        let on_back_rank = |sq: Square| matches!(sq.rank(), Rank::First | Rank::Eighth);
        if board
            .iter()
            .any(|(p, sq)| p.role() == Role::Pawn && on_back_rank(sq))
        {
            return Err(IllegalPosition::PawnsOnBackRank);
        }

        if Color::iter().any(|side| !is_material_reachable(&board, side)) {
            return Err(IllegalPosition::TooMuchMaterial);
        }

        let pos = Position {
            board,
            plies: turn as u32,
            halfmoves: 0,
            en_passant: None,
        };

        if pos.is_king_attacked(!turn) {
            return Err(IllegalPosition::OppositeCheck);
        }

        Ok(pos)
    }

    /// The [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        if self.plies % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// The number of halfmoves played so far.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// The number of halfmoves since the last capture or pawn advance.
    ///
    /// It resets to 0 whenever a piece is captured or a pawn is moved.
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// The square a pawn skipped over on the previous move, if it advanced two squares.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// The [`Piece`] on the given [`Square`], if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq]
    }

    /// [`Square`] occupied by the king of the given color.
    pub fn king(&self, side: Color) -> Option<Square> {
        self.board.king(side)
    }

    /// Into where the piece in this [`Square`] can attack.
    pub fn attacks(&self, sq: Square) -> Squares {
        movegen::attacks(&self.board, sq)
    }

    /// From where pieces of this [`Color`] can attack into this [`Square`].
    pub fn attackers(&self, sq: Square, side: Color) -> Squares {
        movegen::attackers(&self.board, sq, side)
    }

    fn is_king_attacked(&self, side: Color) -> bool {
        self.king(side)
            .is_some_and(|k| movegen::is_attacked(&self.board, k, !side))
    }

    /// Whether the side to move is in [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.turn())
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.moves().is_empty()
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.moves().is_empty()
    }

    /// Whether the game is a draw by the [50-move rule].
    ///
    /// [50-move rule]: https://en.wikipedia.org/wiki/Fifty-move_rule
    pub fn is_draw_by_50_move_rule(&self) -> bool {
        self.halfmoves >= FIFTY_MOVE_RULE
    }

    /// Whether this position has [insufficient material].
    ///
    /// Only the bare kings, or the kings and a single minor piece, qualify.
    ///
    /// [insufficient material]: https://www.chessprogramming.org/Material#InsufficientMaterial
    pub fn is_material_insufficient(&self) -> bool {
        match self.board.len() {
            2 => true,
            3 => self
                .board
                .iter()
                .any(|(p, _)| matches!(p.role(), Role::Bishop | Role::Knight)),
            _ => false,
        }
    }

    /// The [`Outcome`] of the game in case this position is final.
    pub fn outcome(&self) -> Option<Outcome> {
        self.conclude(!self.moves().is_empty())
    }

    /// Classifies this position given whether the side to move has any legal moves.
    pub(crate) fn conclude(&self, can_move: bool) -> Option<Outcome> {
        if !can_move && self.is_check() {
            Some(Outcome::Checkmate(!self.turn()))
        } else if !can_move {
            Some(Outcome::Stalemate)
        } else if self.is_draw_by_50_move_rule() {
            Some(Outcome::DrawBy50MoveRule)
        } else if self.is_material_insufficient() {
            Some(Outcome::DrawByInsufficientMaterial)
        } else {
            None
        }
    }

    /// The moves the piece on this [`Square`] could make if its own king's safety didn't matter.
    pub fn pseudo_legal_moves(&self, sq: Square) -> PieceMoves {
        movegen::pseudo_legal_moves(&self.board, self.en_passant, sq)
    }

    /// Whether a pseudo-legal move keeps the mover's king out of check.
    fn is_safe(&self, m: Move) -> bool {
        let mut next = *self;
        next.apply(m);
        !next.is_king_attacked(self.turn())
    }

    /// The legal moves of the piece on this [`Square`].
    ///
    /// Squares that don't hold a piece of the side to move have no legal moves.
    pub fn moves_from(&self, sq: Square) -> PieceMoves {
        let mut moves = PieceMoves::new();

        if self.board[sq].map(|p| p.color()) == Some(self.turn()) {
            moves.extend(
                self.pseudo_legal_moves(sq)
                    .into_iter()
                    .filter(|&m| self.is_safe(m)),
            );
        }

        moves
    }

    /// All legal [`Move`]s that can be played in this position.
    pub fn moves(&self) -> Moves {
        let mut moves = Moves::new();

        for (p, sq) in self.board.iter() {
            if p.color() == self.turn() {
                moves.extend(self.moves_from(sq));
            }
        }

        moves
    }

    /// Play a [`Move`] if legal in this position.
    ///
    /// Castling and en passant flags need not be set on `m`, they are looked up among the legal
    /// moves from `m`'s source square. On success, returns the move as it was played.
    pub fn play(&mut self, m: Move) -> Result<Move, IllegalMove> {
        let legal = self
            .moves_from(m.whence())
            .into_iter()
            .find(|l| l.matches(&m))
            .ok_or(IllegalMove(m))?;

        self.apply(legal);
        Ok(legal)
    }

    /// Applies a pseudo-legal move without checking whether it is legal.
    pub(crate) fn apply(&mut self, m: Move) {
        let turn = self.turn();
        let (whence, whither) = (m.whence(), m.whither());

        let Some(piece) = self.board.take(whence) else {
            return;
        };

        let mut zeroing = piece.role() == Role::Pawn || self.board[whither].is_some();

        let piece = match Option::<Role>::from(m.promotion_target()) {
            Some(role) => Piece(turn, role),
            None => piece,
        };

        self.board.put(piece, whither);

        if m.is_castling() {
            let rank = whither.rank();
            let (rook, target) = if whither.file() == File::G {
                (File::H, File::F)
            } else {
                (File::A, File::D)
            };

            if let Some(rook) = self.board.take(Square::new(rook, rank)) {
                self.board.put(rook, Square::new(target, rank));
            }
        }

        if let Some(victim) = m.en_passant_victim() {
            zeroing |= self.board.take(victim).is_some();
        }

        self.en_passant = match piece.role() {
            Role::Pawn if (whither.rank() - whence.rank()).abs() == 2 => {
                whence.offset(0, turn.forward())
            }
            _ => None,
        };

        self.halfmoves = if zeroing { 0 } else { self.halfmoves + 1 };
        self.plies += 1;
    }
}

/// Whether every piece of `side` beyond the initial set can be accounted for by a promoted pawn.
fn is_material_reachable(board: &Board, side: Color) -> bool {
    let count = |role| board.iter().filter(|&(p, _)| p == Piece(side, role)).count();

    let pawns = count(Role::Pawn);
    let promoted: usize = [(Role::Knight, 2), (Role::Bishop, 2), (Role::Rook, 2), (Role::Queen, 1)]
        .into_iter()
        .map(|(role, initial)| count(role).saturating_sub(initial))
        .sum();

    pawns <= 8 && pawns + promoted <= 8
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Position {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.board[sq]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.turn())
    }
}
