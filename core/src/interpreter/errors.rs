//! Interpreter error types
//!
//! Nothing a program does can fail mid-run: leaving the grid, returning from
//! an empty call stack and running out of input all end a thread normally.
//! What remains are failures of the outside world.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Source file could not be turned into a program grid
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// I/O stream or thread start failure observed during a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read from input stream: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write to output stream: {0}")]
    Output(#[source] io::Error),

    #[error("failed to start interpreter thread: {0}")]
    Spawn(#[source] io::Error),
}
