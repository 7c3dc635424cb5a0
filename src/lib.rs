// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules engine and game session for two-player chess. Covers piece movement,
//! check and checkmate detection, clocks, and the messages exchanged with a game
//! server. Castling, en passant, promotion and draw rules are not implemented.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod clock;
pub mod inbox;
pub mod movegen;
mod moves;
mod perft;
pub mod protocol;
pub mod rules;
pub mod session;
mod types;

pub use board::{Board, DiagramParseError};
pub use movegen::MoveVec;
pub use moves::Move;
pub use perft::perft;
pub use rules::{CheckStatus, MoveRejection};
pub use session::{ClickOutcome, GameSession, GameState, Mode, SessionConfig};
pub use types::{
    Color, NotationError, Piece, PieceKind, Square, TableIndex, COLORS, PIECE_KINDS, SQUARES,
};
