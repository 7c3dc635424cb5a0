// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `Board` type, an 8x8 grid of optional pieces. Exactly one board is live
//! in a game session; the rules engine clones it freely to try out hypothetical
//! moves, so it is a small value type with no interior sharing.
use std::convert::TryFrom;
use std::fmt;

use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square, SQUARES};

/// Possible errors that can arise when parsing a board diagram into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagramParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    RankDoesNotSumToEight,
    UnknownPiece,
    TooManyRanks,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

lazy_static! {
    static ref START: Board = {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (col, &kind) in back_rank.iter().enumerate() {
            let col = col as i8;
            board.put(Square::new(col, 0), Piece::new(kind, Color::Black));
            board.put(Square::new(col, 1), Piece::new(PieceKind::Pawn, Color::Black));
            board.put(Square::new(col, 6), Piece::new(PieceKind::Pawn, Color::White));
            board.put(Square::new(col, 7), Piece::new(kind, Color::White));
        }

        board
    };
}

//
// Board state getters
//

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard chess starting layout, White on rows 6 and 7.
    pub fn starting() -> Board {
        START.clone()
    }

    /// Returns the piece on the given square. Off-board squares are always empty.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.on_board() {
            return None;
        }

        self.squares[square.row() as usize][square.col() as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Iterates over every occupied square and its occupant, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        SQUARES
            .iter()
            .filter_map(move |&sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Locates the king of the given color. If a board somehow carries more than
    /// one, the first one in row-major order wins.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

//
// Board manipulation
//

impl Board {
    /// Places a piece on a square, replacing whatever was there. Placing a piece
    /// off the board does nothing.
    pub fn put(&mut self, square: Square, piece: Piece) {
        if square.on_board() {
            self.squares[square.row() as usize][square.col() as usize] = Some(piece);
        }
    }

    /// Removes and returns the piece on a square, if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if !square.on_board() {
            return None;
        }

        self.squares[square.row() as usize][square.col() as usize].take()
    }

    /// Moves the piece on the source square to the destination square,
    /// overwriting (capturing) any occupant of the destination. Returns the
    /// captured piece. A move from an empty square leaves the board untouched.
    pub fn relocate(&mut self, mov: Move) -> Option<Piece> {
        let moving = self.remove(mov.source())?;
        let captured = self.remove(mov.destination());
        self.put(mov.destination(), moving);
        captured
    }
}

//
// Diagram parsing and generation.
//
// A diagram is the placement field of a FEN string: eight ranks separated by
// slashes, starting from Black's back rank, with digits standing in for runs of
// empty squares. Positions in tests and on the command line are written this way.
//

impl Board {
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<Board, DiagramParseError> {
        let mut board = Board::empty();
        let mut chars = diagram.as_ref().trim().chars().peekable();
        for row in 0..8 {
            let mut col = 0;
            while col < 8 {
                let c = match chars.next() {
                    Some(c) => c,
                    None => return Err(DiagramParseError::UnexpectedEnd),
                };

                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(DiagramParseError::InvalidDigit);
                    }

                    col += (c as u8 - b'0') as i8;
                    if col > 8 {
                        return Err(DiagramParseError::RankDoesNotSumToEight);
                    }

                    continue;
                }

                if c == '/' {
                    return Err(DiagramParseError::RankDoesNotSumToEight);
                }

                let piece = Piece::try_from(c).map_err(|_| DiagramParseError::UnknownPiece)?;
                board.put(Square::new(col, row), piece);
                col += 1;
            }

            if row != 7 {
                match chars.next() {
                    Some('/') => {}
                    Some(c) => return Err(DiagramParseError::UnexpectedChar(c)),
                    None => return Err(DiagramParseError::UnexpectedEnd),
                }
            }
        }

        if chars.peek().is_some() {
            return Err(DiagramParseError::TooManyRanks);
        }

        Ok(board)
    }

    pub fn as_diagram(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut empty_squares = 0;
            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(col, row)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(col, row)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for col in 0..8 {
            write!(f, " {} ", Square::new(col, 0).file_char())?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board({})", self.as_diagram())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}
