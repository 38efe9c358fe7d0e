use log::debug;

use crate::core::definitions::{Cell, Figure, GameStatus, MatchInterface, MoveError, MoveOutcome};
use crate::core::definitions::{COLS, ROWS};
use crate::core::engine::Board;
use crate::core::fen::FenError;
use crate::core::moves::Move;
use crate::core::piece::{Color, PieceType};
use crate::core::square::Coordinate;

fn ui_cell(board: &Board, pos: Coordinate, current_player: Color) -> Cell {
    match board.piece(pos) {
        None => Cell::Empty,
        Some(piece) => Cell::Figure(Figure {
            kind: piece.kind(),
            color: piece.color(),
            last_move: board.last_move().is_some_and(|_move| _move.to() == pos),
            impose_check: piece.is(PieceType::King) && board.is_in_check(piece.color()),
            can_move: piece.color() == current_player
                && board.game_status() == GameStatus::InProgress
                && board
                    .legal_moves_from(pos)
                    .is_ok_and(|moves| !moves.is_empty()),
        }),
    }
}

pub fn ui_board(board: &Board, current_player: Color) -> Vec<Vec<Cell>> {
    (0..ROWS)
        .map(|row| {
            (0..COLS)
                .map(|col| ui_cell(board, Coordinate::new_unchecked(row, col), current_player))
                .collect()
        })
        .collect()
}

/// One game session: the board plus whose turn it is.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Color,
}

impl Game {
    pub fn new(board: Board) -> Game {
        Game::with_player(board, Color::White)
    }

    pub fn with_player(board: Board, player: Color) -> Game {
        Game {
            board,
            current_player: player,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        let (mut board, player) = Board::from_fen(fen)?;
        // the position may already be decided
        board.check_game_over(player);
        Ok(Game::with_player(board, player))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_turn(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    /** Throws the board away and starts over. */
    pub fn reset(&mut self) {
        *self = Game::default();
    }

    fn ensure_playable(&self) -> Result<(), MoveError> {
        if let Some(pending) = self.board.promotion_pending() {
            return Err(MoveError::PromotionPending(pending.position));
        }
        match self.board.game_status() {
            GameStatus::InProgress => Ok(()),
            finished => Err(MoveError::GameOver(finished)),
        }
    }

    fn ensure_turn(&self, from: Coordinate) -> Result<(), MoveError> {
        let piece = self.board.piece(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color() != self.current_player {
            return Err(MoveError::WrongTurn {
                expected: self.current_player,
                found: piece.color(),
            });
        }
        Ok(())
    }

    /** Half-move is complete: look for the end of the game, then pass the turn. */
    fn finish_turn(&mut self) {
        let opponent = self.current_player.opposite();
        let status = self.board.check_game_over(opponent);
        debug!("{} finished the turn, status: {status:?}", self.current_player);
        self.current_player = opponent;
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::new())
    }
}

impl MatchInterface for Game {
    fn current_board(&self) -> Vec<Vec<Cell>> {
        ui_board(&self.board, self.current_player)
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        Coordinate::new(row, col).map(|pos| ui_cell(&self.board, pos, self.current_player))
    }

    fn legal_moves(&mut self, row: usize, col: usize) -> Result<Vec<Move>, MoveError> {
        let from = Coordinate::at(row, col)?;
        self.ensure_playable()?;
        self.ensure_turn(from)?;
        self.board.legal_moves(row, col)
    }

    fn is_valid(&self, _move: &Move) -> bool {
        self.board.is_valid(_move)
    }

    fn apply(&mut self, _move: &Move) -> Result<MoveOutcome, MoveError> {
        self.ensure_playable()?;
        self.ensure_turn(_move.from())?;
        let outcome = self.board.apply(_move)?;
        if outcome == MoveOutcome::Applied {
            self.finish_turn();
        }
        Ok(outcome)
    }

    fn resolve_promotion(&mut self, choice: PieceType) -> bool {
        let resolved = self.board.resolve_promotion(choice);
        if resolved {
            self.finish_turn();
        }
        resolved
    }

    fn game_status(&self) -> GameStatus {
        self.board.game_status()
    }

    fn last_move(&self) -> Option<Move> {
        self.board.last_move()
    }

    fn in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    fn current_player(&self) -> Color {
        self.current_player
    }
}
