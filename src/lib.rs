pub mod core;
pub mod utils;

// module re-exports
pub use crate::core::definitions::{
    Cell, Figure, GameStatus, MatchInterface, MoveError, MoveOutcome,
};
pub use crate::core::engine::{Board, PendingPromotion};
pub use crate::core::fen::{FenError, STARTING_POSITION};
pub use crate::core::game::Game;
pub use crate::core::moves::{CastlingSide, Move, MoveKind};
pub use crate::core::piece::{Color, Piece, PieceType};
pub use crate::core::square::{Coordinate, Square};
