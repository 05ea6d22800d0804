//! Run and thread state
//!
//! A run has exactly one `RunContext`, shared by every thread:
//! - grid: the loaded program, read-only
//! - memory: the cell store, locked per access
//! - io: the input and output streams
//! - modes: the language flavour, fixed for the whole run
//!
//! Each thread of control exclusively owns one `ThreadState`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::call_stack::CallStack;
use super::grid::ProgramGrid;
use super::io::ProgramIo;
use super::memory::MemoryStore;
use super::types::{Cursor, Direction, Position};

/* ===================== Execution Modes ===================== */

/// Language flavour switches
///
/// All modes default to off, which gives core SNUSP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionModes {
    /// Enables `@` and `#`
    pub modular: bool,
    /// Enables `:` `;` `&` and `%`
    pub bloated: bool,
    /// Defers the extra call/return step from `@` to `#`
    pub twist: bool,
    /// `,` at end of input stores 0 instead of ending the thread
    pub eof_zero: bool,
    /// Verbose tracing and a memory dump at the end of the run
    pub debug: bool,
}

/* ===================== Run Context ===================== */

#[derive(Debug)]
pub struct RunContext {
    pub grid: Arc<ProgramGrid>,
    pub memory: MemoryStore,
    pub io: ProgramIo,
    pub modes: ExecutionModes,
    /// Base seed for `%`; each thread offsets it by its id
    pub seed: Option<u64>,
}

/* ===================== Thread State ===================== */

/// Everything one instruction pointer needs to run
#[derive(Debug, Clone)]
pub struct ThreadState {
    pub id: usize,
    pub ip: Cursor,
    /// Memory pointer
    pub mp: Position,
    pub stack: CallStack,
}

impl ThreadState {
    /// The initial thread: heading right from the start marker, memory at the origin
    pub fn initial(start: Position) -> Self {
        Self {
            id: 0,
            ip: Cursor::new(start, Direction::Right),
            mp: Position::ORIGIN,
            stack: CallStack::new(),
        }
    }

    /// A split-off thread: same pointers, fresh call stack
    pub fn split(&self) -> Self {
        Self {
            id: 0,
            ip: self.ip,
            mp: self.mp,
            stack: CallStack::new(),
        }
    }
}

/* ===================== Step Result ===================== */

/// Why a thread stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadExit {
    /// The instruction pointer moved outside the grid
    LeftGrid,
    /// `#` with an empty call stack
    Returned,
    /// `,` hit end of input with `eof_zero` off
    EndOfInput,
}

/// Result of executing one step
#[derive(Debug, Clone)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// `&` executed; the new thread still has to be started
    Split(ThreadState),
    /// Thread is finished
    Exit(ThreadExit),
}
