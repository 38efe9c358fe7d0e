use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::moves::Move;

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    Black,
    #[default]
    White,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /** Row step of a pawn of this color. */
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /** Row a pawn of this color has to stand on to capture en passant. */
    pub fn en_passant_row(self) -> usize {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Piece a pawn turns into when this type is requested, anything unusual means queen.
    pub fn promotion_target(self) -> PieceType {
        match self {
            PieceType::Rook | PieceType::Bishop | PieceType::Knight => self,
            _ => PieceType::Queen,
        }
    }

    pub fn from_promotion_name(name: &str) -> PieceType {
        match name.trim().to_ascii_lowercase().as_str() {
            "rook" => PieceType::Rook,
            "bishop" => PieceType::Bishop,
            "knight" => PieceType::Knight,
            _ => PieceType::Queen,
        }
    }

    pub fn symbol(self, color: Color) -> char {
        let symbol = match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        if color == Color::White {
            symbol.to_ascii_uppercase()
        } else {
            symbol
        }
    }

    pub fn from_symbol(symbol: char) -> Option<(PieceType, Color)> {
        let kind = match symbol.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((kind, color))
    }
}

/// A piece standing on the board together with the moves last computed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    kind: PieceType,
    color: Color,
    moved: bool,
    /** pawns only: this pawn has just advanced two squares */
    en_passant: bool,
    moves: Vec<Move>,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Piece {
        Piece {
            kind,
            color,
            moved: false,
            en_passant: false,
            moves: Vec::new(),
        }
    }

    pub fn with_moved(mut self, moved: bool) -> Piece {
        self.moved = moved;
        self
    }

    pub fn kind(&self) -> PieceType {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn en_passant(&self) -> bool {
        self.en_passant
    }

    /** Legal moves from the latest computation, empty after any board change. */
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn is(&self, kind: PieceType) -> bool {
        self.kind == kind
    }

    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.moved = moved;
    }

    pub(crate) fn set_en_passant(&mut self, en_passant: bool) {
        self.en_passant = en_passant && self.kind == PieceType::Pawn;
    }

    pub(crate) fn set_moves(&mut self, moves: Vec<Move>) {
        self.moves = moves;
    }

    pub(crate) fn clear_moves(&mut self) {
        self.moves.clear();
    }
}
