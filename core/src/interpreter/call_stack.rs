//! Per-thread call stack for `@` (enter) and `#` (leave)
//!
//! A call/return pair moves the instruction pointer one extra cell in total.
//! Without twist the extra step happens on enter, with twist it happens on
//! leave.

use serde::{Deserialize, Serialize};

use super::types::{Cursor, Direction, Position};

/// Saved instruction pointer of an `@`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub pos: Position,
    pub dir: Direction,
}

/// Outcome of a `#`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave {
    /// Returned into the frame that was on top
    Returned,
    /// Nothing to return to; the thread ends
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Push the current instruction pointer
    pub fn enter(&mut self, ip: &mut Cursor, twist: bool) {
        self.frames.push(Frame {
            pos: ip.pos,
            dir: ip.dir,
        });
        if !twist {
            ip.advance();
        }
    }

    /// Pop the most recent frame back into `ip`
    pub fn leave(&mut self, ip: &mut Cursor, twist: bool) -> Leave {
        let Some(frame) = self.frames.pop() else {
            return Leave::Exhausted;
        };

        ip.pos = frame.pos;
        ip.dir = frame.dir;
        if twist {
            ip.advance();
        }
        Leave::Returned
    }
}
