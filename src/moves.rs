// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt;

use crate::types::{NotationError, Square};

/// A relocation of one piece from a source square to a destination square. Moves
/// carry no flags: there is no castling, en passant or promotion, and whether a
/// move captures is a property of the board it is played on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)
    }
}

/// Parses coordinate notation such as `e2e4`.
impl TryFrom<&str> for Move {
    type Error = NotationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() != 4 || !value.is_char_boundary(2) {
            return Err(NotationError::WrongLength);
        }

        let (source, destination) = value.split_at(2);
        Ok(Move::new(
            Square::try_from(source)?,
            Square::try_from(destination)?,
        ))
    }
}
