// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Messages exchanged with the game server. Every message is one JSON object on
//! its own line, discriminated by its `type` field:
//!
//! ```text
//! {"type":"assignColor","color":"white"}
//! {"type":"turn","currentTurn":"black"}
//! {"type":"move","from":"e2","to":"e4","piece":"pawn","color":"white"}
//! {"type":"gameState","state":"gameOver","message":"White wins by Checkmate!"}
//! ```
//!
//! Squares travel in file/rank notation (`e2`).
use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::moves::Move;
use crate::types::{Color, PieceKind, Square};

/// Notifications sent by the server. The server is authoritative: these are
/// applied to the session as given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Tells a client which side it controls.
    AssignColor { color: Color },

    /// Announces whose move it is.
    Turn {
        #[serde(rename = "currentTurn")]
        current_turn: Color,
    },

    /// A move played on the server's board.
    Move {
        from: Square,
        to: Square,
        piece: PieceKind,
        color: Color,
    },

    /// Starts or ends the game.
    GameState {
        state: RemoteState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoteState {
    Playing,
    GameOver,
}

/// Requests sent by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Ready,
    Move { from: Square, to: Square },
}

impl ClientMessage {
    pub fn for_move(mov: Move) -> ClientMessage {
        ClientMessage::Move {
            from: mov.source(),
            to: mov.destination(),
        }
    }
}

#[derive(Debug)]
pub enum ProtocolError {
    /// The line was empty or only whitespace.
    Empty,

    /// The line was not a message we understand.
    Json(serde_json::Error),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProtocolError::Empty => write!(f, "empty message"),
            ProtocolError::Json(err) => write!(f, "malformed message: {}", err),
        }
    }
}

impl Error for ProtocolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProtocolError::Empty => None,
            ProtocolError::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> ProtocolError {
        ProtocolError::Json(err)
    }
}

/// Decodes one line received from the server.
pub fn decode(line: &str) -> Result<ServerMessage, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }

    Ok(serde_json::from_str(line)?)
}

/// Encodes a message as a single newline-terminated line.
pub fn encode<T: Serialize>(msg: &T) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    Ok(line)
}
