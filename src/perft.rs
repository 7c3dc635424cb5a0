// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::rules;
use crate::types::Color;

/// Counts the leaf nodes of the legal move tree `depth` plies deep, with `color`
/// to move first.
pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = rules::all_legal_moves(board, color);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut next = board.clone();
            next.relocate(mov);
            perft(&next, color.toggle(), depth - 1)
        })
        .sum()
}
