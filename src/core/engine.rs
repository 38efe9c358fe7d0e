use std::fmt::Display;

use log::{debug, info, trace};

use crate::core::definitions::{GameStatus, MoveError, MoveOutcome, COLS, ROWS};
use crate::core::moves::{CastlingSide, Move, MoveKind};
use crate::core::piece::{Color, Piece, PieceType};
use crate::core::square::{Coordinate, Square};
use crate::core::utils::{between, in_direction};

/// Pawn that reached the last rank and waits for the player's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub position: Coordinate,
    pub color: Color,
}

/// The 8x8 grid, owner of every piece.
#[derive(Debug, Clone)]
pub struct Board {
    squares: [[Square; COLS]; ROWS],
    last_move: Option<Move>,
    promotion_pending: Option<PendingPromotion>,
    game_over: GameStatus,
}

impl Board {
    /** Standard starting position. */
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.add_pieces(Color::White);
        board.add_pieces(Color::Black);
        board
    }

    pub fn empty() -> Board {
        Board {
            squares: std::array::from_fn(|row| {
                std::array::from_fn(|col| Square::new(Coordinate::new_unchecked(row, col)))
            }),
            last_move: None,
            promotion_pending: None,
            game_over: GameStatus::InProgress,
        }
    }

    fn add_pieces(&mut self, color: Color) {
        use PieceType::*;
        const BACK_RANK: [PieceType; COLS] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let (row_pawn, row_other) = (color.pawn_row(), color.back_rank());
        for col in 0..COLS {
            self.squares[row_pawn][col].replace(Some(Piece::new(Pawn, color)));
        }
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            self.squares[row_other][col].replace(Some(Piece::new(kind, color)));
        }
    }

    #[inline]
    pub fn square(&self, pos: Coordinate) -> &Square {
        &self.squares[pos.row()][pos.col()]
    }

    #[inline]
    fn square_mut(&mut self, pos: Coordinate) -> &mut Square {
        &mut self.squares[pos.row()][pos.col()]
    }

    pub fn piece(&self, pos: Coordinate) -> Option<&Piece> {
        self.square(pos).piece()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Piece> {
        Coordinate::new(row, col).and_then(|pos| self.piece(pos))
    }

    /** Setup helper, drops every computed move list. */
    pub fn place(&mut self, pos: Coordinate, piece: Piece) -> Option<Piece> {
        let previous = self.square_mut(pos).replace(Some(piece));
        self.invalidate_moves();
        previous
    }

    pub fn remove(&mut self, pos: Coordinate) -> Option<Piece> {
        let previous = self.square_mut(pos).take();
        self.invalidate_moves();
        previous
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub(crate) fn set_last_move(&mut self, last_move: Option<Move>) {
        self.last_move = last_move;
    }

    pub fn promotion_pending(&self) -> Option<PendingPromotion> {
        self.promotion_pending
    }

    pub fn game_status(&self) -> GameStatus {
        self.game_over
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = (Coordinate, &Piece)> + '_ {
        self.squares
            .iter()
            .flatten()
            .filter_map(|square| square.piece().map(|piece| (square.coordinate(), piece)))
    }

    fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> + '_ {
        self.squares.iter_mut().flatten().filter_map(Square::piece_mut)
    }

    pub fn king_position(&self, color: Color) -> Option<Coordinate> {
        self.iter_pieces()
            .find(|(_, piece)| piece.is(PieceType::King) && piece.color() == color)
            .map(|(pos, _)| pos)
    }

    // ---
    // Move generation
    // ---

    /// Recomputes the legal moves of the piece on (`row`, `col`) and stores them on it.
    pub fn legal_moves(&mut self, row: usize, col: usize) -> Result<Vec<Move>, MoveError> {
        let from = Coordinate::at(row, col)?;
        self.calc_moves(from).map(<[Move]>::to_vec)
    }

    pub fn calc_moves(&mut self, from: Coordinate) -> Result<&[Move], MoveError> {
        let moves = self.legal_moves_from(from)?;
        let piece = self
            .square_mut(from)
            .piece_mut()
            .ok_or(MoveError::EmptySquare(from))?;
        piece.set_moves(moves);
        Ok(piece.moves())
    }

    /** Membership in the list from the latest `calc_moves` of the moving piece. */
    pub fn is_valid(&self, _move: &Move) -> bool {
        self.piece(_move.from())
            .is_some_and(|piece| piece.moves().contains(_move))
    }

    pub(crate) fn legal_moves_from(&self, from: Coordinate) -> Result<Vec<Move>, MoveError> {
        let piece = self.piece(from).ok_or(MoveError::EmptySquare(from))?;
        let color = piece.color();
        Ok(self
            .pseudo_legal_moves(from, piece, true)
            .into_iter()
            .filter(|_move| self.is_legal(_move, color))
            .collect())
    }

    pub fn get_all_possible_moves(&self, color: Color) -> Vec<Move> {
        let mut possible_moves = Vec::with_capacity(64);
        for (from, piece) in self.iter_pieces().filter(|(_, piece)| piece.color() == color) {
            possible_moves.extend(
                self.pseudo_legal_moves(from, piece, true)
                    .into_iter()
                    .filter(|_move| self.is_legal(_move, color)),
            );
        }
        possible_moves
    }

    fn has_legal_moves(&self, color: Color) -> bool {
        self.iter_pieces()
            .filter(|(_, piece)| piece.color() == color)
            .any(|(from, piece)| {
                self.pseudo_legal_moves(from, piece, true)
                    .iter()
                    .any(|_move| self.is_legal(_move, color))
            })
    }

    /// Moves that follow the piece's geometry and the current occupancy,
    /// ignoring the safety of its own king.
    /// Castling is skipped when only attacks are of interest: it never captures,
    /// and its own probe looks for attacks.
    fn pseudo_legal_moves(&self, from: Coordinate, piece: &Piece, castling: bool) -> Vec<Move> {
        let color = piece.color();
        let mut moves = Vec::with_capacity(28);
        match piece.kind() {
            PieceType::Pawn => self.pawn_moves(from, color, piece.moved(), &mut moves),
            PieceType::Knight => self.step_moves(from, color, KNIGHT_MOVES, &mut moves),
            PieceType::Bishop => self.sliding_moves(from, color, BISHOP_DIR, &mut moves),
            PieceType::Rook => self.sliding_moves(from, color, ROOK_DIR, &mut moves),
            PieceType::Queen => self.sliding_moves(from, color, QUEEN_DIR, &mut moves),
            PieceType::King => {
                self.step_moves(from, color, KING_MOVES, &mut moves);
                if castling && !piece.moved() {
                    self.castling_moves(from, color, &mut moves);
                }
            }
        }
        moves
    }

    fn target_move(&self, from: Coordinate, to: Coordinate) -> Move {
        match self.piece(to) {
            Some(target) => Move::with_kind(from, to, MoveKind::Capture, Some(target.kind())),
            None => Move::with_kind(from, to, MoveKind::Quiet, None),
        }
    }

    fn pawn_moves(&self, from: Coordinate, color: Color, moved: bool, moves: &mut Vec<Move>) {
        let dir = color.pawn_direction();
        let promotes = |to: Coordinate| to.row() == 0 || to.row() == ROWS - 1;
        // push
        let steps = if moved { 1 } else { 2 };
        for (step, to) in in_direction(from, (dir, 0)).take(steps).enumerate() {
            if self.square(to).has_piece() {
                break;
            }
            let kind = if promotes(to) {
                MoveKind::Promotion
            } else if step == 1 {
                MoveKind::PawnDoublePush
            } else {
                MoveKind::Quiet
            };
            moves.push(Move::with_kind(from, to, kind, None));
        }
        // capture
        for side in [-1, 1] {
            let Some(to) = from.offset(dir, side) else {
                continue;
            };
            if let Some(target) = self.piece(to).filter(|target| target.color() != color) {
                let kind = if promotes(to) {
                    MoveKind::Promotion
                } else {
                    MoveKind::Capture
                };
                moves.push(Move::with_kind(from, to, kind, Some(target.kind())));
            }
        }
        // enpassant
        if from.row() != color.en_passant_row() {
            return;
        }
        for side in [-1, 1] {
            let Some(beside) = from.offset(0, side) else {
                continue;
            };
            let capturable = self.piece(beside).is_some_and(|pawn| {
                pawn.is(PieceType::Pawn) && pawn.color() != color && pawn.en_passant()
            });
            if let Some(to) = beside.offset(dir, 0).filter(|_| capturable) {
                if self.square(to).is_empty() {
                    moves.push(Move::with_kind(
                        from,
                        to,
                        MoveKind::EnPassant,
                        Some(PieceType::Pawn),
                    ));
                }
            }
        }
    }

    fn step_moves(&self, from: Coordinate, color: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(row, col) in offsets {
            if let Some(to) = from.offset(row, col) {
                if self.square(to).is_empty_or_enemy(color) {
                    moves.push(self.target_move(from, to));
                }
            }
        }
    }

    fn sliding_moves(
        &self,
        from: Coordinate,
        color: Color,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &direction in directions {
            for to in in_direction(from, direction) {
                let square = self.square(to);
                if square.has_team_piece(color) {
                    break;
                }
                moves.push(self.target_move(from, to));
                if square.has_enemy_piece(color) {
                    break;
                }
            }
        }
    }

    fn castling_moves(&self, from: Coordinate, color: Color, moves: &mut Vec<Move>) {
        if from != Coordinate::new_unchecked(color.back_rank(), KING_HOME_COL) {
            return;
        }
        if self.is_in_check(color) {
            trace!("{color} king is in check, no castling");
            return;
        }
        for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
            let rook_pos = Coordinate::new_unchecked(from.row(), side.rook_col());
            let rook_ready = self.piece(rook_pos).is_some_and(|rook| {
                rook.is(PieceType::Rook) && rook.color() == color && !rook.moved()
            });
            if !rook_ready || between(from, rook_pos).any(|pos| self.square(pos).has_piece()) {
                continue;
            }
            let target = Coordinate::new_unchecked(from.row(), side.king_target_col());
            let Some(transit) = between(from, target).next() else {
                continue;
            };
            if self.king_attacked_on(from, transit, color) || self.king_attacked_on(from, target, color)
            {
                trace!("{color} {side:?} castling withheld, king passes an attacked square");
                continue;
            }
            moves.push(Move::with_kind(from, target, MoveKind::Castling(side), None));
        }
    }

    // ---
    // Legality
    // ---

    /// Simulates the move on a copy and looks whether `color`'s king is attacked afterwards.
    /// Castling moves are probed square by square during generation instead.
    fn is_legal(&self, _move: &Move, color: Color) -> bool {
        if _move.castling_side().is_some() {
            return true;
        }
        let mut probe = self.clone();
        probe.execute(*_move);
        let legal = !probe.is_in_check(color);
        if !legal {
            trace!("{_move} would leave {color} king attacked");
        }
        legal
    }

    /** Only the king is moved, the rook stays where it is. */
    fn king_attacked_on(&self, king: Coordinate, square: Coordinate, color: Color) -> bool {
        let mut probe = self.clone();
        let king = probe.square_mut(king).take();
        probe.square_mut(square).replace(king);
        probe.is_in_check(color)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_position(color) {
            Some(king) => self.reaches(king, color.opposite()),
            None => false,
        }
    }

    /// Some piece of `attacker` has a pseudo-legal move ending on `target`.
    /// Pawn pushes end on empty squares only, so `target` has to be occupied.
    fn reaches(&self, target: Coordinate, attacker: Color) -> bool {
        self.iter_pieces()
            .filter(|(_, piece)| piece.color() == attacker)
            .any(|(from, piece)| {
                self.pseudo_legal_moves(from, piece, false)
                    .iter()
                    .any(|_move| _move.to() == target)
            })
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Records the result when `current_player`, the side to move, has nothing to play.
    pub fn check_game_over(&mut self, current_player: Color) -> GameStatus {
        if self.has_legal_moves(current_player) {
            return self.game_over;
        }
        self.game_over = if self.is_in_check(current_player) {
            info!("checkmate, {} wins", current_player.opposite());
            GameStatus::won_by(current_player.opposite())
        } else {
            info!("stalemate, {current_player} can't move");
            GameStatus::Stalemate
        };
        self.game_over
    }

    // ---
    // Mutation
    // ---

    /// Plays a move taken from the moving piece's legal-move list.
    pub fn apply(&mut self, _move: &Move) -> Result<MoveOutcome, MoveError> {
        if let Some(pending) = self.promotion_pending {
            return Err(MoveError::PromotionPending(pending.position));
        }
        if self.game_over.is_over() {
            return Err(MoveError::GameOver(self.game_over));
        }
        let piece = self
            .piece(_move.from())
            .ok_or(MoveError::EmptySquare(_move.from()))?;
        let Some(legal) = piece.moves().iter().find(|&legal| legal == _move).copied() else {
            return Err(MoveError::IllegalMove(*_move));
        };
        debug!("{} {:?} plays {legal} ({:?})", piece.color(), piece.kind(), legal.kind());
        Ok(self.execute(legal))
    }

    /** Execute ***generated*** move, no validation here. */
    fn execute(&mut self, _move: Move) -> MoveOutcome {
        let (from, to) = (_move.from(), _move.to());
        let Some(mut piece) = self.square_mut(from).take() else {
            trace!("Nothing to move on {from}, {_move} ignored");
            return MoveOutcome::Applied;
        };
        if piece.is(PieceType::Pawn) && from.col() != to.col() && self.square(to).is_empty() {
            // enpassant, the captured pawn shares the origin row
            self.square_mut(Coordinate::new_unchecked(from.row(), to.col()))
                .take();
        }
        if piece.is(PieceType::King) && from.col().abs_diff(to.col()) == 2 {
            self.castle_rook(from.row(), CastlingSide::from_king_move(from, to));
        }
        let double_push = piece.is(PieceType::Pawn) && from.row().abs_diff(to.row()) == 2;
        let promotion = piece.is(PieceType::Pawn) && (to.row() == 0 || to.row() == ROWS - 1);
        let color = piece.color();
        for pawn in self.pieces_mut() {
            pawn.set_en_passant(false);
        }
        piece.set_en_passant(double_push);
        piece.set_moved(true);
        self.square_mut(to).replace(Some(piece));
        self.last_move = Some(_move);
        self.invalidate_moves();
        if promotion {
            self.promotion_pending = Some(PendingPromotion { position: to, color });
            MoveOutcome::PromotionNeeded
        } else {
            MoveOutcome::Applied
        }
    }

    fn castle_rook(&mut self, row: usize, side: CastlingSide) {
        let rook_from = Coordinate::new_unchecked(row, side.rook_col());
        let rook_to = Coordinate::new_unchecked(row, side.rook_target_col());
        match self.square_mut(rook_from).take() {
            Some(mut rook) => {
                rook.set_moved(true);
                rook.clear_moves();
                self.square_mut(rook_to).replace(Some(rook));
                debug!("castling rook {rook_from} -> {rook_to}");
            }
            None => trace!("No rook on {rook_from} to castle with"),
        }
    }

    /// Replaces the pending pawn. Returns `false` when nothing waits for promotion.
    pub fn resolve_promotion(&mut self, choice: PieceType) -> bool {
        let Some(PendingPromotion { position, color }) = self.promotion_pending.take() else {
            trace!("No promotion pending, {choice:?} ignored");
            return false;
        };
        let kind = choice.promotion_target();
        self.square_mut(position)
            .replace(Some(Piece::new(kind, color).with_moved(true)));
        self.invalidate_moves();
        debug!("{color} pawn on {position} promoted to {kind:?}");
        true
    }

    fn invalidate_moves(&mut self) {
        for piece in self.pieces_mut() {
            piece.clear_moves();
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", ROWS - row)?;
            for square in squares {
                let symbol = square
                    .piece()
                    .map(|piece| piece.kind().symbol(piece.color()))
                    .unwrap_or('.');
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

const KING_HOME_COL: usize = 4;

/** Tables directions for pieces, (row, col) */
const BISHOP_DIR: &[(i8, i8)] = &[(-1, 1), (-1, -1), (1, 1), (1, -1)];
const ROOK_DIR: &[(i8, i8)] = &[(-1, 0), (0, 1), (1, 0), (0, -1)];
const QUEEN_DIR: &[(i8, i8)] = &[
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
];

/** Possible moves for pieces */
const KING_MOVES: &[(i8, i8)] = QUEEN_DIR;
const KNIGHT_MOVES: &[(i8, i8)] = &[
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
];
