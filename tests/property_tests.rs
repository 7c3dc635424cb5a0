// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Random playouts from the starting position, checking properties of move
//! generation and check detection at every ply.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use gambit::movegen;
use gambit::rules;
use gambit::{Board, Color, PieceKind, Square, COLORS, SQUARES};

const PLIES: usize = 120;

fn playout<F>(seed: u64, mut check: F)
where
    F: FnMut(&Board, Color),
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::starting();
    let mut color = Color::White;
    for _ in 0..PLIES {
        check(&board, color);
        let moves = rules::all_legal_moves(&board, color);
        let mov = match moves.choose(&mut rng) {
            Some(&mov) => mov,
            None => break,
        };

        board.relocate(mov);
        color = color.toggle();
    }
}

fn signum(n: i8) -> i8 {
    if n > 0 {
        1
    } else if n < 0 {
        -1
    } else {
        0
    }
}

#[test]
fn generated_moves_stay_on_board_and_off_own_pieces() {
    for seed in 0..4 {
        playout(seed, |board, _| {
            for (from, piece) in board.occupied() {
                for target in movegen::generate_moves(board, from) {
                    assert!(target.on_board());
                    if let Some(occupant) = board.piece_at(target) {
                        assert_ne!(piece.color, occupant.color);
                    }
                }
            }
        });
    }
}

#[test]
fn sliders_stop_at_first_piece() {
    for seed in 10..14 {
        playout(seed, |board, _| {
            for (from, piece) in board.occupied() {
                match piece.kind {
                    PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop => {}
                    _ => continue,
                }

                for target in movegen::generate_moves(board, from) {
                    let dc = signum(target.col() - from.col());
                    let dr = signum(target.row() - from.row());
                    let mut between = Square::new(from.col() + dc, from.row() + dr);
                    while between != target {
                        assert!(board.is_empty(between), "{} jumps over {}", from, between);
                        between = Square::new(between.col() + dc, between.row() + dr);
                    }
                }
            }
        });
    }
}

#[test]
fn pawn_double_step_precondition() {
    for seed in 20..24 {
        playout(seed, |board, _| {
            for (from, piece) in board.occupied() {
                if piece.kind != PieceKind::Pawn {
                    continue;
                }

                let forward = piece.color.forward();
                let expected = from.row() == piece.color.pawn_start_row()
                    && board.is_empty(Square::new(from.col(), from.row() + forward))
                    && board.is_empty(Square::new(from.col(), from.row() + 2 * forward));
                let double = Square::new(from.col(), from.row() + 2 * forward);
                let generated = movegen::generate_moves(board, from).contains(&double);
                assert_eq!(expected, generated, "pawn on {}", from);
            }
        });
    }
}

#[test]
fn check_matches_attacks_on_king() {
    for seed in 30..34 {
        playout(seed, |board, _| {
            for &color in COLORS.iter() {
                let king = match board.find_king(color) {
                    Some(king) => king,
                    None => continue,
                };

                let attacked = board
                    .pieces(color.toggle())
                    .any(|(from, _)| movegen::generate_moves(board, from).contains(&king));
                assert_eq!(attacked, rules::is_in_check(board, color));
            }
        });
    }
}

#[test]
fn legal_moves_never_leave_king_in_check() {
    for seed in 40..44 {
        playout(seed, |board, color| {
            if rules::is_checkmate(board, color) {
                assert!(rules::is_in_check(board, color));
            }

            for mov in rules::all_legal_moves(board, color) {
                let mut next = board.clone();
                next.relocate(mov);
                assert!(!rules::is_in_check(&next, color), "{} leaves king in check", mov);
            }
        });
    }
}

#[test]
fn notation_round_trips() {
    use std::convert::TryFrom;

    for &square in SQUARES.iter() {
        let name = square.to_string();
        assert_eq!(Ok(square), Square::try_from(name.as_str()));
    }
}
