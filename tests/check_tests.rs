// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;

use gambit::rules::{self, CheckStatus};
use gambit::{Board, Color, Square, COLORS};

fn sq(s: &str) -> Square {
    Square::try_from(s).unwrap()
}

#[test]
fn smoke_test_starting_position() {
    let board = Board::starting();

    // neither side is in check.
    assert!(!rules::is_in_check(&board, Color::White));
    assert!(!rules::is_in_check(&board, Color::Black));
}

#[test]
fn fools_mate_check() {
    let board = Board::from_diagram("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();

    // white is checkmated
    assert!(rules::is_in_check(&board, Color::White));
    assert!(rules::is_checkmate(&board, Color::White));
}

#[test]
fn sliding_piece_pin() {
    let board = Board::from_diagram("8/8/4q3/8/8/8/4P3/4K3").unwrap();

    // white is not checked, the white pawn is blocking the queen
    assert!(!rules::is_in_check(&board, Color::White));
    assert!(rules::legal_moves(&board, sq("e2")).contains(&sq("e3")));
}

#[test]
fn rook_on_back_rank_checks_through_empty_squares() {
    let board = Board::from_diagram("rnR2k1r/pp1qbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R").unwrap();

    // black is checked by the white rook
    assert!(rules::is_in_check(&board, Color::Black));
    assert_eq!(
        CheckStatus::Check(sq("f8")),
        rules::check_status(&board, Color::Black)
    );
}

#[test]
fn lone_rook_checks_king_on_open_file() {
    let board = Board::from_diagram("3r4/8/8/8/8/8/8/3K4").unwrap();
    assert!(rules::is_in_check(&board, Color::White));

    // the king steps off the file.
    assert!(!rules::is_checkmate(&board, Color::White));
    let escapes = rules::legal_moves(&board, sq("d1"));
    assert!(escapes.contains(&sq("c1")));
    assert!(!escapes.contains(&sq("d2")));
}

#[test]
fn cornered_king_with_defended_queen_is_mated() {
    let board = Board::from_diagram("1r6/8/8/8/8/8/1q6/K7").unwrap();
    assert!(rules::is_checkmate(&board, Color::White));
    assert!(rules::all_legal_moves(&board, Color::White).is_empty());
}

#[test]
fn lone_kings_are_safe() {
    let board = Board::from_diagram("8/8/2k5/8/8/5K2/8/8").unwrap();
    for &color in COLORS.iter() {
        assert!(!rules::is_in_check(&board, color));
        assert!(!rules::is_checkmate(&board, color));
        assert_eq!(CheckStatus::None, rules::check_status(&board, color));
    }
}

#[test]
fn knight_check_cannot_be_blocked() {
    // black knight on f3 checks the white king on e1; only king moves help.
    let board = Board::from_diagram("4k3/8/8/8/8/5n2/3PPP2/3QKB2").unwrap();
    assert!(rules::is_in_check(&board, Color::White));
    for mov in rules::all_legal_moves(&board, Color::White) {
        let captures_knight = mov.destination() == sq("f3");
        assert!(mov.source() == sq("e1") || captures_knight);
    }
}

#[test]
fn smothered_mate() {
    let board = Board::from_diagram("6rk/5Npp/8/8/8/8/8/6K1").unwrap();
    assert!(rules::is_checkmate(&board, Color::Black));
}
