// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation. Moves produced here obey the movement geometry
//! and occupancy rules of each piece, but make no attempt to keep the mover's own
//! king out of check; that filter lives in `rules`.
//!
//! Each piece kind has one rule function, and `RULES` maps kinds to rules so that
//! adding a kind without a rule fails to compile.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Color, PieceKind, Square, TableIndex};

/// Target squares reachable by a single piece. A queen in the middle of an empty
/// board has 27 targets, the most any piece can have.
pub type MoveVec = ArrayVec<[Square; 32]>;

type MoveRule = fn(&Board, Square, Color, &mut MoveVec);

// Indexed by `PieceKind::as_index`.
static RULES: [MoveRule; 6] = [
    king_moves,
    queen_moves,
    rook_moves,
    bishop_moves,
    knight_moves,
    pawn_moves,
];

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Generates the pseudo-legal target squares for the piece on `square`. An empty
/// or off-board square has no moves.
pub fn generate_moves(board: &Board, square: Square) -> MoveVec {
    let mut moves = MoveVec::new();
    if let Some(piece) = board.piece_at(square) {
        RULES[piece.kind.as_index()](board, square, piece.color, &mut moves);
    }

    moves
}

/// Returns whether the piece on `source` attacks (or could move to) `target`.
pub fn reaches(board: &Board, source: Square, target: Square) -> bool {
    generate_moves(board, source).contains(&target)
}

fn can_land(board: &Board, target: Square, color: Color) -> bool {
    match board.piece_at(target) {
        Some(occupant) => occupant.color != color,
        None => true,
    }
}

fn slide(board: &Board, square: Square, color: Color, dirs: &[(i8, i8)], moves: &mut MoveVec) {
    for &(dc, dr) in dirs {
        let mut current = square;
        while let Some(target) = current.offset(dc, dr) {
            match board.piece_at(target) {
                Some(occupant) => {
                    // The first occupied square ends the slide. It is a target
                    // only when it can be captured.
                    if occupant.color != color {
                        moves.push(target);
                    }
                    break;
                }
                None => moves.push(target),
            }

            current = target;
        }
    }
}

fn step(board: &Board, square: Square, color: Color, offsets: &[(i8, i8)], moves: &mut MoveVec) {
    for &(dc, dr) in offsets {
        if let Some(target) = square.offset(dc, dr) {
            if can_land(board, target, color) {
                moves.push(target);
            }
        }
    }
}

fn king_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    step(board, square, color, &KING_STEPS, moves);
}

fn queen_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    slide(board, square, color, &ORTHOGONALS, moves);
    slide(board, square, color, &DIAGONALS, moves);
}

fn rook_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    slide(board, square, color, &ORTHOGONALS, moves);
}

fn bishop_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    slide(board, square, color, &DIAGONALS, moves);
}

fn knight_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    step(board, square, color, &KNIGHT_JUMPS, moves);
}

fn pawn_moves(board: &Board, square: Square, color: Color, moves: &mut MoveVec) {
    let forward = color.forward();
    if let Some(single) = square.offset(0, forward) {
        if board.is_empty(single) {
            moves.push(single);

            // The double step needs both the intermediate and the destination
            // squares empty, and is only available from the starting row.
            if square.row() == color.pawn_start_row() {
                if let Some(double) = square.offset(0, 2 * forward) {
                    if board.is_empty(double) {
                        moves.push(double);
                    }
                }
            }
        }
    }

    for &dc in &[-1, 1] {
        if let Some(target) = square.offset(dc, forward) {
            match board.piece_at(target) {
                Some(occupant) if occupant.color != color => moves.push(target),
                _ => {}
            }
        }
    }
}
