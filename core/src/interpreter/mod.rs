//! # SNUSP Interpreter
//!
//! Runs a loaded program grid to completion.
//!
//! ## Core Principles
//!
//! 1. **Shared run context**: the grid, memory store and I/O streams live in
//!    one `RunContext` handed to every thread explicitly
//! 2. **Owned thread state**: each instruction pointer owns its cursor,
//!    memory pointer and call stack
//! 3. **Tracked threads**: `&` spawns a new blocking task; the run is over
//!    when the coordinator has seen every task exit
//!
//! # Example
//!
//! ```no_run
//! use snusp_core::interpreter::{ExecutionModes, Interpreter, ProgramGrid};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = ProgramGrid::from_source("$,.");
//! let report = Interpreter::new(grid, ExecutionModes::default())
//!     .run(std::io::stdin(), std::io::stdout())
//!     .await?;
//! println!("{} thread(s)", report.threads);
//! # Ok(())
//! # }
//! ```

pub mod call_stack;
pub mod coordinator;
pub mod errors;
pub mod exec_loop;
pub mod grid;
pub mod io;
pub mod memory;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::sync::Arc;

// Re-export commonly used items
pub use coordinator::{ExitCounts, ThreadCoordinator};
pub use errors::{LoadError, RunError};
pub use exec_loop::{run_until_done, step};
pub use grid::ProgramGrid;
pub use memory::MemoryStore;
pub use types::{Cursor, Direction, Instruction, Position};
pub use vm::{ExecutionModes, RunContext, Step, ThreadExit, ThreadState};

/* ===================== Run Report ===================== */

/// One written memory cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCell {
    pub x: i64,
    pub y: i64,
    pub value: u8,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Threads that ran, the initial one included
    pub threads: usize,
    /// Instructions executed across all threads
    pub steps: u64,
    pub exits: ExitCounts,
    /// Every cell ever written, row-major
    pub memory: Vec<MemoryCell>,
}

impl RunReport {
    /// Value of a memory cell as left by the run
    pub fn cell(&self, x: i64, y: i64) -> u8 {
        self.memory
            .iter()
            .find(|c| c.x == x && c.y == y)
            .map(|c| c.value)
            .unwrap_or(0)
    }
}

/* ===================== Interpreter ===================== */

/// A program plus the modes to run it with
#[derive(Debug, Clone)]
pub struct Interpreter {
    grid: Arc<ProgramGrid>,
    modes: ExecutionModes,
    seed: Option<u64>,
}

impl Interpreter {
    pub fn new(grid: ProgramGrid, modes: ExecutionModes) -> Self {
        Self {
            grid: Arc::new(grid),
            modes,
            seed: None,
        }
    }

    /// Make `%` reproducible
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run the program until every thread has exited
    ///
    /// `,` reads from `input` and `.` writes to `output`. Each
    /// instruction pointer gets its own OS thread; the returned future
    /// resolves once the last of them has exited.
    pub async fn run(
        &self,
        input: impl Read + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Result<RunReport, RunError> {
        let started_at = Utc::now();
        let ctx = Arc::new(RunContext {
            grid: Arc::clone(&self.grid),
            memory: MemoryStore::new(),
            io: io::ProgramIo::new(input, output),
            modes: self.modes,
            seed: self.seed,
        });

        tracing::debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            start = %self.grid.start(),
            modes = ?self.modes,
            "run started"
        );

        let coordinator = ThreadCoordinator::new();
        coordinator.spawn(&ctx, ThreadState::initial(self.grid.start()));
        coordinator.join().await;

        if let Some(err) = coordinator.take_error() {
            return Err(err);
        }
        ctx.io.flush()?;

        let memory: Vec<MemoryCell> = ctx
            .memory
            .snapshot()
            .into_iter()
            .map(|(pos, value)| MemoryCell {
                x: pos.x,
                y: pos.y,
                value,
            })
            .collect();

        if self.modes.debug {
            tracing::debug!(cells = memory.len(), "memory dump");
            for cell in &memory {
                tracing::debug!(x = cell.x, y = cell.y, value = cell.value, "memory cell");
            }
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            threads: coordinator.threads_spawned(),
            steps: coordinator.steps(),
            exits: coordinator.exits(),
            memory,
        };
        tracing::debug!(threads = report.threads, steps = report.steps, "run finished");

        Ok(report)
    }
}
