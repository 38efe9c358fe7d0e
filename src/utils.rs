use std::{fmt::Display, ops::AddAssign};

use log::{debug, warn};

use crate::core::definitions::MoveOutcome;
use crate::core::engine::Board;
use crate::core::fen::FenError;
use crate::core::moves::{Move, MoveKind};
use crate::core::piece::{Color, PieceType};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} ep: {:<4} cs: {:<4} pr: {:<4} Ch: {:<4} CM: {:4}",
            self.nodes,
            self.captures,
            self.en_passant,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates
        )
    }
}

/// Every legal move of `color` with the boards it leads to,
/// one board per promotion choice.
fn children(board: &Board, color: Color) -> Vec<(Move, Board)> {
    let origins: Vec<_> = board
        .iter_pieces()
        .filter(|(_, piece)| piece.color() == color)
        .map(|(pos, _)| pos)
        .collect();
    let mut result = Vec::new();
    for from in origins {
        let mut base = board.clone();
        let moves = match base.calc_moves(from) {
            Ok(moves) => moves.to_vec(),
            Err(error) => {
                warn!("Skipping {from}: {error}");
                continue;
            }
        };
        for _move in moves {
            let mut child = base.clone();
            match child.apply(&_move) {
                Ok(MoveOutcome::Applied) => result.push((_move, child)),
                Ok(MoveOutcome::PromotionNeeded) => {
                    for kind in PieceType::PROMOTIONS {
                        let mut promoted = child.clone();
                        promoted.resolve_promotion(kind);
                        result.push((_move, promoted));
                    }
                }
                Err(error) => warn!("Generated move {_move} was rejected: {error}"),
            }
        }
    }
    result
}

fn count_leaf(board: &Board, _move: &Move, mover: Color) -> PerftResult {
    let opponent = mover.opposite();
    let checked = board.is_in_check(opponent);
    PerftResult {
        nodes: 1,
        captures: _move.is_capture() as usize,
        en_passant: (_move.kind() == MoveKind::EnPassant) as usize,
        castles: _move.castling_side().is_some() as usize,
        promotions: _move.is_promotion() as usize,
        checks: checked as usize,
        checkmates: (checked && board.is_checkmate(opponent)) as usize,
    }
}

/// Walks the move tree `depth` half-moves deep, `color` to move first.
pub fn perft(board: &Board, color: Color, depth: usize) -> PerftResult {
    if depth == 0 {
        return PerftResult {
            nodes: 1,
            ..Default::default()
        };
    }
    let mut result = PerftResult::default();
    for (_move, child) in children(board, color) {
        result += if depth == 1 {
            count_leaf(&child, &_move, color)
        } else {
            perft(&child, color.opposite(), depth - 1)
        };
    }
    result
}

/// Node count below each root move, promotion choices summed up.
pub fn divide(board: &Board, color: Color, depth: usize) -> Vec<(Move, usize)> {
    let mut result: Vec<(Move, usize)> = Vec::new();
    for (_move, child) in children(board, color) {
        let nodes = perft(&child, color.opposite(), depth.saturating_sub(1)).nodes;
        match result.iter_mut().find(|(seen, _)| *seen == _move) {
            Some((_, total)) => *total += nodes,
            None => result.push((_move, nodes)),
        }
    }
    result
}

pub fn perf_test(fen: &str, depth: usize, expected: usize, verbose: bool) -> Result<bool, FenError> {
    let (board, color) = Board::from_fen(fen)?;
    let result = perft(&board, color, depth);
    if verbose {
        println!("Depth {depth}: {result}");
    }
    debug!("perft {depth} of '{fen}': {result}");
    Ok(result.nodes == expected)
}
