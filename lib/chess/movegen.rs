use crate::chess::{Board, Color, File, Move, Piece, Promotion, Rank, Role, Square};
use arrayvec::ArrayVec;

/// The pseudo-legal moves of a single piece.
pub type PieceMoves = ArrayVec<Move, 32>;

/// A set of squares small enough to hold everything a single piece can reach.
pub type Squares = ArrayVec<Square, 32>;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Extends each ray until it leaves the board or hits a piece, which is included.
fn slide(board: &Board, whence: Square, rays: &[(i8, i8)], squares: &mut Squares) {
    for &(df, dr) in rays {
        let mut sq = whence;
        while let Some(next) = sq.offset(df, dr) {
            squares.push(next);
            if board[next].is_some() {
                break;
            }

            sq = next;
        }
    }
}

fn leap(whence: Square, offsets: &[(i8, i8)], squares: &mut Squares) {
    squares.extend(offsets.iter().filter_map(|&(df, dr)| whence.offset(df, dr)));
}

/// The squares attacked by the piece on `whence`, regardless of who occupies them.
///
/// Pawns attack diagonally forward whether or not there is anything to capture, sliding pieces
/// attack up to and including the first piece on each ray, and castling is never an attack.
pub fn attacks(board: &Board, whence: Square) -> Squares {
    let mut squares = Squares::new();

    match board[whence] {
        None => {}
        Some(Piece(side, Role::Pawn)) => {
            let forward = side.forward();
            leap(whence, &[(-1, forward), (1, forward)], &mut squares);
        }
        Some(Piece(_, Role::Knight)) => leap(whence, &KNIGHT, &mut squares),
        Some(Piece(_, Role::King)) => leap(whence, &KING, &mut squares),
        Some(Piece(_, Role::Bishop)) => slide(board, whence, &DIAGONAL, &mut squares),
        Some(Piece(_, Role::Rook)) => slide(board, whence, &ORTHOGONAL, &mut squares),
        Some(Piece(_, Role::Queen)) => {
            slide(board, whence, &ORTHOGONAL, &mut squares);
            slide(board, whence, &DIAGONAL, &mut squares);
        }
    }

    squares
}

/// The first occupied square along a ray, if any.
fn blocker(board: &Board, whence: Square, (df, dr): (i8, i8)) -> Option<Square> {
    let mut sq = whence;
    loop {
        sq = sq.offset(df, dr)?;
        if board[sq].is_some() {
            return Some(sq);
        }
    }
}

/// The squares from where pieces of `side` attack `target`.
///
/// This is the reverse of [`attacks`]: rather than probing every piece of `side`, it walks outwards
/// from `target` looking for the pieces that could reach it.
pub fn attackers(board: &Board, target: Square, side: Color) -> Squares {
    let holds = |sq: &Square, role: fn(&Role) -> bool| {
        matches!(board[*sq], Some(Piece(c, r)) if c == side && role(&r))
    };

    let leaps = |offsets: &'static [(i8, i8)]| {
        offsets
            .iter()
            .filter_map(move |&(df, dr)| target.offset(df, dr))
    };

    // A pawn attacks the squares diagonally in front of it, so look diagonally behind the target.
    let behind = -side.forward();
    let pawns = [(-1, behind), (1, behind)];

    let mut squares = Squares::new();

    squares.extend(
        ORTHOGONAL
            .iter()
            .filter_map(|&ray| blocker(board, target, ray))
            .filter(|sq| holds(sq, Role::is_orthogonal_slider)),
    );

    squares.extend(
        DIAGONAL
            .iter()
            .filter_map(|&ray| blocker(board, target, ray))
            .filter(|sq| holds(sq, Role::is_diagonal_slider)),
    );

    squares.extend(leaps(&KNIGHT).filter(|sq| holds(sq, |r| *r == Role::Knight)));
    squares.extend(leaps(&KING).filter(|sq| holds(sq, |r| *r == Role::King)));

    squares.extend(
        pawns
            .iter()
            .filter_map(|&(df, dr)| target.offset(df, dr))
            .filter(|sq| holds(sq, |r| *r == Role::Pawn)),
    );

    squares
}

/// Whether any piece of `side` attacks `target`.
pub fn is_attacked(board: &Board, target: Square, side: Color) -> bool {
    !attackers(board, target, side).is_empty()
}

/// Pushes a pawn move, expanding it into one move per promotion target on the farthest rank.
fn push_pawn_move(moves: &mut PieceMoves, whence: Square, whither: Square, side: Color) {
    if whither.rank() == Rank::Eighth.relative_to(side) {
        moves.extend(
            Promotion::TARGETS
                .into_iter()
                .map(|p| Move::promotion(whence, whither, p)),
        );
    } else {
        moves.push(Move::new(whence, whither));
    }
}

fn pawn_moves(
    board: &Board,
    en_passant: Option<Square>,
    whence: Square,
    side: Color,
    moves: &mut PieceMoves,
) {
    let forward = side.forward();

    if let Some(one) = whence.offset(0, forward).filter(|&sq| board[sq].is_none()) {
        push_pawn_move(moves, whence, one, side);

        if !board.has_moved(whence) {
            if let Some(two) = one.offset(0, forward).filter(|&sq| board[sq].is_none()) {
                moves.push(Move::new(whence, two));
            }
        }
    }

    for whither in attacks(board, whence) {
        match board[whither] {
            Some(Piece(c, _)) if c != side => push_pawn_move(moves, whence, whither, side),
            None if en_passant == Some(whither) => {
                let m = Move::en_passant(whence, whither);
                if m.en_passant_victim().and_then(|sq| board[sq]) == Some(Piece(!side, Role::Pawn))
                {
                    moves.push(m);
                }
            }
            _ => {}
        }
    }
}

fn castling_moves(board: &Board, whence: Square, side: Color, moves: &mut PieceMoves) {
    if board.has_moved(whence) || is_attacked(board, whence, !side) {
        return;
    }

    let rank = whence.rank();

    // (rook's file, squares between king and rook, square the king crosses, king's destination)
    let wings: [(File, &[File], File, File); 2] = [
        (File::H, &[File::F, File::G], File::F, File::G),
        (File::A, &[File::B, File::C, File::D], File::D, File::C),
    ];

    for (rook, between, transit, whither) in wings {
        let rook = Square::new(rook, rank);

        if board[rook] == Some(Piece(side, Role::Rook))
            && !board.has_moved(rook)
            && between.iter().all(|&f| board[Square::new(f, rank)].is_none())
            && !is_attacked(board, Square::new(transit, rank), !side)
        {
            moves.push(Move::castling(whence, Square::new(whither, rank)));
        }
    }
}

/// The moves the piece on `whence` is physically allowed to make.
///
/// These obey the piece's movement rule and the board's occupancy, but may leave the mover's own
/// king in check. An empty square has no moves.
pub fn pseudo_legal_moves(board: &Board, en_passant: Option<Square>, whence: Square) -> PieceMoves {
    let mut moves = PieceMoves::new();

    let Some(Piece(side, role)) = board[whence] else {
        return moves;
    };

    if role == Role::Pawn {
        pawn_moves(board, en_passant, whence, side, &mut moves);
    } else {
        for whither in attacks(board, whence) {
            if board[whither].map(|p| p.color()) != Some(side) {
                moves.push(Move::new(whence, whither));
            }
        }

        if role == Role::King {
            castling_moves(board, whence, side, &mut moves);
        }
    }

    moves
}
