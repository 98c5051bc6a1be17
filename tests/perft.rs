use lib::chess::{Board, Color, File, Piece, Position, Rank, Square};
use rayon::prelude::*;
use test_strategy::proptest;

fn perft(pos: &Position, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().len(),
        d => pos
            .moves()
            .into_iter()
            .par_bridge()
            .map(|m| {
                let mut next = *pos;
                assert_eq!(next.play(m), Ok(m));
                perft(&next, d - 1)
            })
            .sum(),
    }
}

/// Sets up a position from the piece placement field of a FEN record.
fn setup(placement: &str, turn: Color) -> Position {
    let mut board = Vec::new();

    for (r, row) in Rank::iter().rev().zip(placement.split('/')) {
        let mut files = File::iter();
        for c in row.chars() {
            match c.to_digit(10) {
                Some(n) => {
                    files.nth(n as usize - 1);
                }

                None => {
                    let f = files.next().expect("too many squares in a rank");
                    let p: Piece = c.to_string().parse().expect("invalid piece");
                    board.push((Square::new(f, r), p));
                }
            }
        }
    }

    Position::new(board.into_iter().collect::<Board>(), turn).expect("illegal position")
}

#[cfg(not(tarpaulin))]
#[proptest(cases = 1)]
fn perft_expands_expected_number_of_nodes() {
    // https://www.chessprogramming.org/Perft_Results#Initial_Position
    let pos = Position::default();
    assert_eq!(perft(&pos, 1), 20);
    assert_eq!(perft(&pos, 2), 400);
    assert_eq!(perft(&pos, 3), 8902);
    assert_eq!(perft(&pos, 4), 197281);

    // https://www.chessprogramming.org/Perft_Results#Position_2
    let pos = setup(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        Color::White,
    );

    assert_eq!(perft(&pos, 1), 48);
    assert_eq!(perft(&pos, 2), 2039);
    assert_eq!(perft(&pos, 3), 97862);

    // https://www.chessprogramming.org/Perft_Results#Position_3
    let pos = setup("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White);
    assert_eq!(perft(&pos, 1), 14);
    assert_eq!(perft(&pos, 2), 191);
    assert_eq!(perft(&pos, 3), 2812);
    assert_eq!(perft(&pos, 4), 43238);

    // https://www.chessprogramming.org/Perft_Results#Position_4
    let pos = setup(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
        Color::White,
    );

    assert_eq!(perft(&pos, 1), 6);
    assert_eq!(perft(&pos, 2), 264);
    assert_eq!(perft(&pos, 3), 9467);

    // https://www.chessprogramming.org/Perft_Results#Position_5
    let pos = setup(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
        Color::White,
    );

    assert_eq!(perft(&pos, 1), 44);
    assert_eq!(perft(&pos, 2), 1486);
    assert_eq!(perft(&pos, 3), 62379);
}

#[test]
fn move_list_holds_the_most_mobile_position_known() {
    // https://www.chessprogramming.org/Encoding_Moves#MoveIndex
    let pos = setup(
        "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/1Q4Rp/1K1BBNNk",
        Color::White,
    );

    assert_eq!(perft(&pos, 1), 218);
}
