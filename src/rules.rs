// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board analysis: check detection, move legality and checkmate detection.
//!
//! Everything here is built on pseudo-legal move generation plus simulation: a
//! move is legal if, played on a copy of the board, it does not leave the mover's
//! king attacked. `keeps_king_safe` is the one place that simulation happens, and
//! move highlighting, move validation and checkmate detection all go through it.
use std::fmt;

use crate::board::Board;
use crate::movegen::{self, MoveVec};
use crate::moves::Move;
use crate::types::{Color, Piece, Square};

/// The check state of one side, derived from a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    None,
    Check(Square),
    Checkmate(Color),
}

/// Reasons a move attempt can be turned down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    NoPiece,
    NotYourPiece,
    IllegalTarget,
    KingInCheck,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            MoveRejection::NoPiece => "Invalid move: no piece on that square",
            MoveRejection::NotYourPiece => "Invalid move: not your piece",
            MoveRejection::IllegalTarget => "Invalid move: piece cannot move there",
            MoveRejection::KingInCheck => "Invalid move: King would be in check!",
        };
        f.write_str(msg)
    }
}

/// Returns whether the king of the given color is attacked by any opposing piece.
/// A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king = match board.find_king(color) {
        Some(king) => king,
        None => return false,
    };

    board
        .pieces(color.toggle())
        .any(|(attacker, _)| movegen::reaches(board, attacker, king))
}

/// Plays the move on a copy of the board and reports whether the mover's king is
/// safe afterwards. The move is assumed to be pseudo-legal; a move from an empty
/// square is never safe.
pub fn keeps_king_safe(board: &Board, mov: Move) -> bool {
    let mover = match board.piece_at(mov.source()) {
        Some(piece) => piece,
        None => return false,
    };

    let mut simulated = board.clone();
    simulated.relocate(mov);
    !is_in_check(&simulated, mover.color)
}

/// Legal target squares for the piece on `square`: its pseudo-legal moves that do
/// not leave its own king in check.
pub fn legal_moves(board: &Board, square: Square) -> MoveVec {
    movegen::generate_moves(board, square)
        .into_iter()
        .filter(|&target| keeps_king_safe(board, Move::new(square, target)))
        .collect()
}

/// Every legal move available to the given color.
pub fn all_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = vec![];
    for (square, _) in board.pieces(color) {
        for target in legal_moves(board, square) {
            moves.push(Move::new(square, target));
        }
    }

    moves
}

/// Returns whether the given color is checkmated: in check, with no move by any of
/// its pieces that gets the king out of it.
///
/// A side that is not in check is never checkmated, even with no legal moves.
/// Stalemate is not detected.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !is_in_check(board, color) {
        return false;
    }

    board
        .pieces(color)
        .all(|(square, _)| legal_moves(board, square).is_empty())
}

pub fn check_status(board: &Board, color: Color) -> CheckStatus {
    let king = match board.find_king(color) {
        Some(king) if is_in_check(board, color) => king,
        _ => return CheckStatus::None,
    };

    if is_checkmate(board, color) {
        CheckStatus::Checkmate(color)
    } else {
        CheckStatus::Check(king)
    }
}

/// Validates a move for the given side and, if it is legal, plays it on the board.
/// Returns the captured piece, if any. A rejected move leaves the board untouched.
pub fn try_move(board: &mut Board, mov: Move, color: Color) -> Result<Option<Piece>, MoveRejection> {
    let mover = board.piece_at(mov.source()).ok_or(MoveRejection::NoPiece)?;
    if mover.color != color {
        return Err(MoveRejection::NotYourPiece);
    }

    if !movegen::generate_moves(board, mov.source()).contains(&mov.destination()) {
        return Err(MoveRejection::IllegalTarget);
    }

    if !keeps_king_safe(board, mov) {
        return Err(MoveRejection::KingInCheck);
    }

    Ok(board.relocate(mov))
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::types::{PieceKind, Square, COLORS};

    fn sq(s: &str) -> Square {
        Square::try_from(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::try_from(s).unwrap()
    }

    #[test]
    fn check_smoke() {
        let board = Board::from_diagram("3r4/8/8/8/8/8/8/3K4").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn blocked_slider_does_not_check() {
        let board = Board::from_diagram("8/8/4q3/8/8/8/4P3/4K3").unwrap();
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally_not_forward() {
        let board = Board::from_diagram("8/8/8/8/8/4p3/4K3/8").unwrap();
        assert!(!is_in_check(&board, Color::White));

        let board = Board::from_diagram("8/8/8/8/8/3p4/4K3/8").unwrap();
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let board = Board::from_diagram("3r4/8/8/8/8/8/8/8").unwrap();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
        assert_eq!(CheckStatus::None, check_status(&board, Color::White));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // white bishop on d3 pinned by the queen on d6 against the king on d2.
        let board = Board::from_diagram("8/8/3q4/8/8/3B4/3K4/8").unwrap();
        assert!(!movegen::generate_moves(&board, sq("d3")).is_empty());
        assert!(legal_moves(&board, sq("d3")).is_empty());
    }

    #[test]
    fn piece_may_capture_pinning_slider() {
        let board = Board::from_diagram("8/8/8/q7/8/2B5/3K4/8").unwrap();
        let moves = legal_moves(&board, sq("c3"));
        assert!(moves.contains(&sq("b4")));
        assert!(moves.contains(&sq("a5")));
        assert!(!moves.contains(&sq("d4")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let board = Board::from_diagram("8/8/8/8/8/8/r7/4K3").unwrap();
        let moves = legal_moves(&board, sq("e1"));
        assert_eq!(2, moves.len());
        assert!(moves.contains(&sq("d1")));
        assert!(moves.contains(&sq("f1")));
    }

    #[test]
    fn keeps_king_safe_requires_a_piece() {
        let board = Board::starting();
        assert!(!keeps_king_safe(&board, mv("e4e5")));
        assert!(keeps_king_safe(&board, mv("e2e4")));
    }

    #[test]
    fn cornered_king_is_checkmated() {
        // white king a1, black queen b2 defended by the rook on b8.
        let board = Board::from_diagram("1r6/8/8/8/8/8/1q6/K7").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
        assert_eq!(
            CheckStatus::Checkmate(Color::White),
            check_status(&board, Color::White)
        );
        assert!(all_legal_moves(&board, Color::White).is_empty());
    }

    #[test]
    fn check_escapable_by_capture() {
        // the undefended queen on b2 can be taken.
        let board = Board::from_diagram("8/8/8/8/8/8/1q6/K7").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
        assert_eq!(
            CheckStatus::Check(sq("a1")),
            check_status(&board, Color::White)
        );
        assert_eq!(vec![mv("a1b2")], all_legal_moves(&board, Color::White));
    }

    #[test]
    fn check_escapable_by_block() {
        // the rook on e2 is the only piece that can interpose on the back rank.
        let board = Board::from_diagram("6k1/8/8/8/8/8/4RPPP/r5K1").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(!is_checkmate(&board, Color::White));
        assert_eq!(vec![mv("e2e1")], all_legal_moves(&board, Color::White));
    }

    #[test]
    fn back_rank_mate() {
        let board = Board::from_diagram("6k1/8/8/8/8/8/5PPP/3r2K1").unwrap();
        assert!(is_checkmate(&board, Color::White));
    }

    #[test]
    fn fools_mate() {
        let mut board = Board::starting();
        for &(mov, color) in &[
            ("f2f3", Color::White),
            ("e7e5", Color::Black),
            ("g2g4", Color::White),
            ("d8h4", Color::Black),
        ] {
            try_move(&mut board, mv(mov), color).unwrap();
        }

        assert!(is_checkmate(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        // black king h8 has no moves but is not attacked.
        let board = Board::from_diagram("7k/5Q2/6K1/8/8/8/8/8").unwrap();
        assert!(!is_in_check(&board, Color::Black));
        assert!(all_legal_moves(&board, Color::Black).is_empty());
        assert!(!is_checkmate(&board, Color::Black));
    }

    #[test]
    fn bare_kings() {
        let board = Board::from_diagram("4k3/8/8/8/8/8/8/4K3").unwrap();
        for &color in COLORS.iter() {
            assert!(!is_in_check(&board, color));
            assert!(!is_checkmate(&board, color));
        }
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::starting();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
        assert_eq!(20, all_legal_moves(&board, Color::White).len());
        assert_eq!(20, all_legal_moves(&board, Color::Black).len());
    }

    #[test]
    fn try_move_rejections() {
        let mut board = Board::from_diagram("4k3/8/8/8/8/4r3/4N3/4K3").unwrap();
        assert_eq!(
            Err(MoveRejection::NoPiece),
            try_move(&mut board, mv("a1a2"), Color::White)
        );
        assert_eq!(
            Err(MoveRejection::NotYourPiece),
            try_move(&mut board, mv("e3e2"), Color::White)
        );
        assert_eq!(
            Err(MoveRejection::IllegalTarget),
            try_move(&mut board, mv("e2e4"), Color::White)
        );
        assert_eq!(
            Err(MoveRejection::KingInCheck),
            try_move(&mut board, mv("e2c3"), Color::White)
        );
        assert_eq!(
            "Invalid move: King would be in check!",
            MoveRejection::KingInCheck.to_string()
        );
        assert_eq!(
            Board::from_diagram("4k3/8/8/8/8/4r3/4N3/4K3").unwrap(),
            board
        );
    }

    #[test]
    fn try_move_captures() {
        let mut board = Board::from_diagram("4k3/8/8/8/8/8/4r3/4K3").unwrap();
        let captured = try_move(&mut board, mv("e1e2"), Color::White).unwrap();
        assert_eq!(Some(Piece::new(PieceKind::Rook, Color::Black)), captured);
        assert_eq!(None, try_move(&mut board, mv("e8d8"), Color::Black).unwrap());
        assert_eq!(Board::from_diagram("3k4/8/8/8/8/8/4K3/8").unwrap(), board);
    }
}
