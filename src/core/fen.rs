//! Loading positions from Forsyth–Edwards Notation.
//!
//! Only the first four fields matter here: placement, side to move, castling
//! availability and the en passant target. Move counters are accepted and ignored.

use thiserror::Error;

use crate::core::definitions::{COLS, ROWS};
use crate::core::engine::Board;
use crate::core::moves::{Move, MoveKind};
use crate::core::piece::{Color, Piece, PieceType};
use crate::core::square::Coordinate;

pub const STARTING_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("empty position description")]
    Empty,
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    RankLength { rank: usize, files: usize },
    #[error("unknown piece symbol '{0}'")]
    UnknownPiece(char),
    #[error("unknown side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en passant target '{0}'")]
    EnPassant(String),
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    DuplicateKing(Color),
}

#[derive(Clone, Copy, Debug, Default)]
struct CastlingRights {
    king_side: bool,
    queen_side: bool,
}

impl Board {
    /// Builds the board and tells whose turn it is.
    pub fn from_fen(fen: &str) -> Result<(Board, Color), FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let side_to_move = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::SideToMove(other.to_owned())),
        };
        let (white_rights, black_rights) = parse_castling(fields.next().unwrap_or("-"))?;
        let rights = |color: Color| match color {
            Color::White => white_rights,
            Color::Black => black_rights,
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != ROWS {
            return Err(FenError::RankCount(ranks.len()));
        }
        let mut board = Board::empty();
        for (row, rank) in ranks.into_iter().enumerate() {
            let mut col = 0;
            for symbol in rank.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    col += skip as usize;
                    continue;
                }
                let (kind, color) =
                    PieceType::from_symbol(symbol).ok_or(FenError::UnknownPiece(symbol))?;
                let pos = Coordinate::new(row, col).ok_or(FenError::RankLength {
                    rank: ROWS - row,
                    files: col + 1,
                })?;
                let moved = has_moved(pos, kind, color, rights(color));
                board.place(pos, Piece::new(kind, color).with_moved(moved));
                col += 1;
            }
            if col != COLS {
                return Err(FenError::RankLength {
                    rank: ROWS - row,
                    files: col,
                });
            }
        }
        for color in [Color::White, Color::Black] {
            let kings = board
                .iter_pieces()
                .filter(|(_, piece)| piece.is(PieceType::King) && piece.color() == color)
                .count();
            match kings {
                0 => return Err(FenError::MissingKing(color)),
                1 => (),
                _ => return Err(FenError::DuplicateKing(color)),
            }
        }

        match fields.next() {
            None | Some("-") => (),
            Some(target) => mark_double_push(&mut board, target, side_to_move)?,
        }
        Ok((board, side_to_move))
    }
}

fn parse_castling(field: &str) -> Result<(CastlingRights, CastlingRights), FenError> {
    let mut white = CastlingRights::default();
    let mut black = CastlingRights::default();
    if field == "-" {
        return Ok((white, black));
    }
    for symbol in field.chars() {
        match symbol {
            'K' => white.king_side = true,
            'Q' => white.queen_side = true,
            'k' => black.king_side = true,
            'q' => black.queen_side = true,
            _ => return Err(FenError::Castling(field.to_owned())),
        }
    }
    Ok((white, black))
}

/** Moved flags are not part of the notation, derive them from the squares. */
fn has_moved(pos: Coordinate, kind: PieceType, color: Color, rights: CastlingRights) -> bool {
    let home_rank = pos.row() == color.back_rank();
    match kind {
        PieceType::Pawn => pos.row() != color.pawn_row(),
        PieceType::King => !(home_rank && pos.col() == 4 && (rights.king_side || rights.queen_side)),
        PieceType::Rook => {
            !(home_rank
                && ((pos.col() == 7 && rights.king_side) || (pos.col() == 0 && rights.queen_side)))
        }
        _ => false,
    }
}

/// The target square lies behind the pawn that has just advanced two squares,
/// that pawn belongs to the side that is not on move.
fn mark_double_push(board: &mut Board, target: &str, side_to_move: Color) -> Result<(), FenError> {
    let invalid = || FenError::EnPassant(target.to_owned());
    let target_pos = Coordinate::from_name(target).ok_or_else(invalid)?;
    let pusher = side_to_move.opposite();
    let dir = pusher.pawn_direction();
    let origin = target_pos.offset(-dir, 0).ok_or_else(invalid)?;
    let pawn_pos = target_pos.offset(dir, 0).ok_or_else(invalid)?;
    let pushed = board
        .piece(pawn_pos)
        .is_some_and(|pawn| pawn.is(PieceType::Pawn) && pawn.color() == pusher);
    if origin.row() != pusher.pawn_row() || !pushed || board.square(target_pos).has_piece() {
        return Err(invalid());
    }
    let mut pawn = Piece::new(PieceType::Pawn, pusher).with_moved(true);
    pawn.set_en_passant(true);
    board.place(pawn_pos, pawn);
    board.set_last_move(Some(Move::with_kind(
        origin,
        pawn_pos,
        MoveKind::PawnDoublePush,
        None,
    )));
    Ok(())
}
