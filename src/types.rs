// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// Clocks are indexed by color and move rules by piece kind, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Possible errors that can arise when reading a square in file/rank notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NotationError {
    WrongLength,
    InvalidFile(char),
    InvalidRank(char),
}

impl Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotationError::WrongLength => write!(f, "square must be a file and a rank"),
            NotationError::InvalidFile(c) => write!(f, "invalid file `{}`", c),
            NotationError::InvalidRank(c) => write!(f, "invalid rank `{}`", c),
        }
    }
}

/// A square on the board, addressed by column (file a..h is 0..7) and row. Row 0 is
/// Black's back rank and row 7 is White's.
///
/// Squares are allowed to lie off the board so that move generation can probe
/// offsets freely; `on_board` tells the two apart and every board access treats an
/// off-board square as empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    col: i8,
    row: i8,
}

impl Square {
    pub const fn new(col: i8, row: i8) -> Square {
        Square { col, row }
    }

    pub fn col(self) -> i8 {
        self.col
    }

    pub fn row(self) -> i8 {
        self.row
    }

    pub fn on_board(self) -> bool {
        0 <= self.col && self.col < 8 && 0 <= self.row && self.row < 8
    }

    /// The square `dc` columns and `dr` rows away, if it is still on the board.
    pub fn offset(self, dc: i8, dr: i8) -> Option<Square> {
        let target = Square::new(self.col + dc, self.row + dr);
        if target.on_board() {
            Some(target)
        } else {
            None
        }
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col as u8) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row as u8) as char
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.on_board() {
            return f.write_char('-');
        }

        f.write_char(self.file_char())?;
        f.write_char(self.rank_char())
    }
}

impl TryFrom<&str> for Square {
    type Error = NotationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(NotationError::WrongLength),
        };

        if file < 'a' || file > 'h' {
            return Err(NotationError::InvalidFile(file));
        }

        if rank < '1' || rank > '8' {
            return Err(NotationError::InvalidRank(rank));
        }

        let col = (file as u8 - b'a') as i8;
        let row = (b'8' - rank as u8) as i8;
        Ok(Square::new(col, row))
    }
}

impl TryFrom<String> for Square {
    type Error = NotationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::try_from(value.as_str())
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

lazy_static! {
    /// Every square on the board in row-major order, starting from a8.
    pub static ref SQUARES: [Square; 64] = {
        let mut squares = [Square::new(0, 0); 64];
        for (idx, sq) in squares.iter_mut().enumerate() {
            *sq = Square::new((idx % 8) as i8, (idx / 8) as i8);
        }
        squares
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction a pawn of this color advances in, as a row delta.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    fn letter(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Pawn => "pawn",
        };
        f.write_str(name)
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Pawn,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return Err(()),
        };

        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        };

        f.write_char(chr)
    }
}
