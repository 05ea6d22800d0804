//! Grid and memory coordinates, and the instruction pointer cursor

use super::direction::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column/row coordinate
///
/// Used both for the program grid and for memory cells. Positions carry no
/// bounds of their own; the grid decides what is inside it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step along `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Instruction pointer: where a thread is and where it is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub pos: Position,
    pub dir: Direction,
}

impl Cursor {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }

    /// Move one cell along the current heading
    pub fn advance(&mut self) {
        self.pos = self.pos.step(self.dir);
    }
}
