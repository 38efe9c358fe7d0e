use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::definitions::{MoveError, COLS, ROWS};
use crate::core::piece::{Color, Piece};
use crate::core::utils::{is_valid_coord, pos_to_str, str_to_pos};

/// Position on the board, row 0 is black's back rank and column 0 is the a-file.
/// Can only be built from in-range values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "(u8, u8)", into = "(u8, u8)")
)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Option<Coordinate> {
        if row < ROWS && col < COLS {
            Some(Coordinate {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /** Index pair already known to be in range. */
    pub(crate) fn new_unchecked(row: usize, col: usize) -> Coordinate {
        debug_assert!(row < ROWS && col < COLS, "({row}, {col}) is off the board");
        Coordinate {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn at(row: usize, col: usize) -> Result<Coordinate, MoveError> {
        Coordinate::new(row, col).ok_or_else(|| MoveError::InvalidCoordinate {
            row: i32::try_from(row).unwrap_or(i32::MAX),
            col: i32::try_from(col).unwrap_or(i32::MAX),
        })
    }

    pub fn checked(row: i32, col: i32) -> Result<Coordinate, MoveError> {
        if is_valid_coord(row, col) {
            Ok(Coordinate {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(MoveError::InvalidCoordinate { row, col })
        }
    }

    pub fn from_name(name: &str) -> Option<Coordinate> {
        str_to_pos(name)
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    pub fn offset(self, row: i8, col: i8) -> Option<Coordinate> {
        let (row, col) = (self.row as i32 + row as i32, self.col as i32 + col as i32);
        Coordinate::checked(row, col).ok()
    }

    /// Every square, row by row.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| Coordinate { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Coordinate {
    type Error = MoveError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coordinate::checked(row as i32, col as i32)
    }
}

impl From<Coordinate> for (u8, u8) {
    fn from(value: Coordinate) -> Self {
        (value.row, value.col)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(pos_to_str(*self))
    }
}

#[derive(Clone, Debug)]
pub struct Square {
    coordinate: Coordinate,
    piece: Option<Piece>,
}

impl Square {
    pub fn new(coordinate: Coordinate) -> Square {
        Square {
            coordinate,
            piece: None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    pub(crate) fn take(&mut self) -> Option<Piece> {
        self.piece.take()
    }

    /** Puts `piece` here, whatever stood here before is returned. */
    pub(crate) fn replace(&mut self, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.piece, piece)
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    pub fn has_piece(&self) -> bool {
        self.piece.is_some()
    }

    pub fn has_team_piece(&self, color: Color) -> bool {
        self.piece.as_ref().is_some_and(|piece| piece.color() == color)
    }

    pub fn has_enemy_piece(&self, color: Color) -> bool {
        self.piece.as_ref().is_some_and(|piece| piece.color() != color)
    }

    pub fn is_empty_or_enemy(&self, color: Color) -> bool {
        self.is_empty() || self.has_enemy_piece(color)
    }
}
