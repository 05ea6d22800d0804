//! Type definitions for the interpreter
//!
//! - Headings and mirror rotations (Direction)
//! - Coordinates and the instruction pointer (Position, Cursor)
//! - The instruction set (Instruction)

pub mod direction;
pub mod instruction;
pub mod position;

pub use direction::Direction;
pub use instruction::{Instruction, START_MARKER};
pub use position::{Cursor, Position};
