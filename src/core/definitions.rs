#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::moves::Move;
use crate::core::piece::{Color, PieceType};
use crate::core::square::Coordinate;

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceType,
    pub color: Color,
    pub last_move: bool,
    pub impose_check: bool,
    pub can_move: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameStatus {
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameStatus::WhiteWins,
            Color::Black => GameStatus::BlackWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::WhiteWins => Some(Color::White),
            GameStatus::BlackWins => Some(Color::Black),
            _ => None,
        }
    }
}

/// What the caller has to do after a move was accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveOutcome {
    Applied,
    /** pawn reached the last rank, choice must be supplied before the turn ends */
    PromotionNeeded,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinate ({row}, {col}) is outside of the board")]
    InvalidCoordinate { row: i32, col: i32 },
    #[error("there is no piece on {0}")]
    EmptySquare(Coordinate),
    #[error("{0} is not in the piece's legal moves")]
    IllegalMove(Move),
    #[error("promotion on {0} has to be resolved first")]
    PromotionPending(Coordinate),
    #[error("game is already finished: {0:?}")]
    GameOver(GameStatus),
    #[error("it's {expected}'s turn, not {found}'s")]
    WrongTurn { expected: Color, found: Color },
}

/// Contract between the rules engine and whatever draws the board and reads input.
pub trait MatchInterface {
    fn current_board(&self) -> Vec<Vec<Cell>>;
    fn cell(&self, row: usize, col: usize) -> Option<Cell>;
    fn legal_moves(&mut self, row: usize, col: usize) -> Result<Vec<Move>, MoveError>;
    fn is_valid(&self, _move: &Move) -> bool;
    fn apply(&mut self, _move: &Move) -> Result<MoveOutcome, MoveError>;
    fn resolve_promotion(&mut self, choice: PieceType) -> bool;
    // info
    fn game_status(&self) -> GameStatus;
    fn last_move(&self) -> Option<Move>;
    fn in_check(&self, color: Color) -> bool;
    fn current_player(&self) -> Color;
}
