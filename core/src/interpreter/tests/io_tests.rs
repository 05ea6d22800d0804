//! Tests for `,` and `.`
//!
//! Covers echo, end-of-input handling in both modes and stream failures.

use super::helpers::{core, run_program, SharedBuffer};
use crate::interpreter::{ExecutionModes, Interpreter, ProgramGrid, RunError};
use std::io::{self, Read};

fn eof_zero() -> ExecutionModes {
    ExecutionModes {
        eof_zero: true,
        ..ExecutionModes::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_echo_single_byte() {
    let (output, report) = run_program("$,.", core(), &[65]).await;

    assert_eq!(output, b"A".to_vec());
    assert_eq!(report.steps, 3);
    assert_eq!(report.exits.left_grid, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_read_overwrites_cell() {
    let (output, _) = run_program("$+++,.", core(), b"A").await;
    assert_eq!(output, b"A".to_vec());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_end_of_input_ends_thread() {
    let (output, report) = run_program("$,.,.,.", core(), b"ab").await;

    assert_eq!(output, b"ab".to_vec());
    assert_eq!(report.exits.end_of_input, 1);
    assert_eq!(report.exits.left_grid, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_end_of_input_writes_zero_when_enabled() {
    let (output, report) = run_program("$,.,.,.", eof_zero(), b"ab").await;

    assert_eq!(output, vec![b'a', b'b', 0]);
    assert_eq!(report.exits.left_grid, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_end_of_input_zero_replaces_previous_value() {
    let (output, _) = run_program("$+++,.", eof_zero(), b"").await;
    assert_eq!(output, vec![0]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_echo_loop_until_end_of_input() {
    // `,` ends the thread at end of input, so this copies input to output.
    let source = ["  /  \\", "$!\\,./"].join("\n");
    let (output, report) = run_program(&source, core(), b"cat!").await;

    assert_eq!(output, b"cat!".to_vec());
    assert_eq!(report.exits.end_of_input, 1);
}

struct BrokenInput;

impl Read for BrokenInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_input_failure_is_reported() {
    let result = Interpreter::new(ProgramGrid::from_source("$,."), core())
        .run(BrokenInput, SharedBuffer::new())
        .await;

    assert!(matches!(result, Err(RunError::Input(_))));
}
