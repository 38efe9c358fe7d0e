use crate::core::definitions::{COLS, ROWS};
use crate::core::square::Coordinate;

#[derive(Debug)]
pub struct BetweenIterator {
    current: Coordinate,
    target: Coordinate,
    step: (i8, i8),
}

impl Iterator for BetweenIterator {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next = self.current.offset(self.step.0, self.step.1)?;
        if next == self.target {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}

/// Squares strictly between `from` and `to`.
/// Points that don't share a line have nothing between them.
pub fn between(from: Coordinate, to: Coordinate) -> BetweenIterator {
    if from == to || (!is_in_diagonal_line(from, to) && !is_in_straight_line(from, to)) {
        return BetweenIterator {
            current: from,
            target: from,
            step: (0, 0),
        };
    }
    let step = (
        (to.row() as i8 - from.row() as i8).signum(),
        (to.col() as i8 - from.col() as i8).signum(),
    );
    BetweenIterator {
        current: from,
        target: to,
        step,
    }
}

pub struct DirectionIterator {
    position: Coordinate,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (row, col) = self.direction;
        self.position = self.position.offset(row, col)?;
        Some(self.position)
    }
}

/// Walks from `position` (exclusive) until the edge of the board.
pub fn in_direction(position: Coordinate, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

pub fn is_in_straight_line(a: Coordinate, b: Coordinate) -> bool {
    a.row() == b.row() || a.col() == b.col()
}

pub fn is_in_diagonal_line(a: Coordinate, b: Coordinate) -> bool {
    a.row().abs_diff(b.row()) == a.col().abs_diff(b.col())
}

#[inline]
pub fn is_valid_coord(row: i32, col: i32) -> bool {
    (0..ROWS as i32).contains(&row) && (0..COLS as i32).contains(&col)
}

// row 0 is black's back rank
const POS_TO_STRING: [[&str; COLS]; ROWS] = [
    ["a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8"],
    ["a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7"],
    ["a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6"],
    ["a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5"],
    ["a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4"],
    ["a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3"],
    ["a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2"],
    ["a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1"],
];

pub fn pos_to_str(pos: Coordinate) -> &'static str {
    POS_TO_STRING[pos.row()][pos.col()]
}

pub fn str_to_pos(name: &str) -> Option<Coordinate> {
    let mut chars = name.chars();
    let (file, rank) = (chars.next()?, chars.next()?);
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Coordinate::new(b'8' as usize - rank as usize, file as usize - 'a' as usize)
}
