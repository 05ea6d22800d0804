//! Test helpers for interpreter tests
//!
//! Common utilities for running programs against in-memory streams

use crate::interpreter::{ExecutionModes, Interpreter, ProgramGrid, RunReport};
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Output sink that can still be inspected after the interpreter took it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn replace(&self, bytes: Vec<u8>) {
        *self.0.lock().unwrap() = bytes;
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `source` to completion with `input` on stdin
///
/// # Returns
/// Everything the program wrote, and the run report
pub async fn run_program(
    source: &str,
    modes: ExecutionModes,
    input: &[u8],
) -> (Vec<u8>, RunReport) {
    run_seeded(source, modes, input, None).await
}

pub async fn run_seeded(
    source: &str,
    modes: ExecutionModes,
    input: &[u8],
    seed: Option<u64>,
) -> (Vec<u8>, RunReport) {
    let output = SharedBuffer::new();
    let report = Interpreter::new(ProgramGrid::from_source(source), modes)
        .with_seed(seed)
        .run(Cursor::new(input.to_vec()), output.clone())
        .await
        .expect("Program run failed");
    (output.contents(), report)
}

pub fn core() -> ExecutionModes {
    ExecutionModes::default()
}

pub fn modular() -> ExecutionModes {
    ExecutionModes {
        modular: true,
        ..ExecutionModes::default()
    }
}

pub fn twist() -> ExecutionModes {
    ExecutionModes {
        modular: true,
        twist: true,
        ..ExecutionModes::default()
    }
}

pub fn bloated() -> ExecutionModes {
    ExecutionModes {
        modular: true,
        bloated: true,
        ..ExecutionModes::default()
    }
}
