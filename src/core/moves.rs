use std::fmt::Display;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::piece::PieceType;
use crate::core::square::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub fn rook_col(self) -> usize {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub fn rook_target_col(self) -> usize {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    pub fn king_target_col(self) -> usize {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    pub fn from_king_move(from: Coordinate, to: Coordinate) -> CastlingSide {
        if to.col() > from.col() {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }
}

/// Informational tag, set by generation. Never part of move equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Quiet,
    Capture,
    PawnDoublePush,
    /** captured pawn stands beside the origin, not on the destination */
    EnPassant,
    /** king's two-square slide, the rook follows */
    Castling(CastlingSide),
    /** pawn reaching the last rank, may capture as well */
    Promotion,
}

/// Pair of squares. Two moves are equal when both squares match,
/// whatever was recorded about the captured piece.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    from: Coordinate,
    to: Coordinate,
    kind: MoveKind,
    captured: Option<PieceType>,
}

impl Move {
    /** Bare move, good enough to look up a generated one. */
    pub fn new(from: Coordinate, to: Coordinate) -> Move {
        Move {
            from,
            to,
            kind: MoveKind::Quiet,
            captured: None,
        }
    }

    pub(crate) fn with_kind(
        from: Coordinate,
        to: Coordinate,
        kind: MoveKind,
        captured: Option<PieceType>,
    ) -> Move {
        Move {
            from,
            to,
            kind,
            captured,
        }
    }

    pub fn from(&self) -> Coordinate {
        self.from
    }

    pub fn to(&self) -> Coordinate {
        self.to
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn captured(&self) -> Option<PieceType> {
        self.captured
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn castling_side(&self) -> Option<CastlingSide> {
        match self.kind {
            MoveKind::Castling(side) => Some(side),
            _ => None,
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
