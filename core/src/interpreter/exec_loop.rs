//! Core execution loop
//!
//! This module contains the step() function - the heart of the interpreter.
//! One call executes the instruction under the instruction pointer and then
//! moves the pointer one cell along its heading. Instructions that move the
//! pointer themselves (`!`, a taken `?`, `@`, `#`, `&`) do so on top of that
//! per-step advance.
//!
//! ## Function Organization
//! 1. run_until_done() - drives one thread until it exits
//! 2. step() - executes a single instruction

use rand::Rng;

use super::call_stack::Leave;
use super::errors::RunError;
use super::types::Instruction;
use super::vm::{RunContext, Step, ThreadExit, ThreadState};

/// How a thread ended and how much work it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadSummary {
    pub exit: ThreadExit,
    pub steps: u64,
}

/* ===================== Public API ===================== */

/// Run one thread until it exits
///
/// Threads created by `&` are handed to `spawn` as soon as the split step
/// completes; this loop never runs them itself.
pub fn run_until_done<R: Rng>(
    ctx: &RunContext,
    thread: &mut ThreadState,
    rng: &mut R,
    mut spawn: impl FnMut(ThreadState),
) -> Result<ThreadSummary, RunError> {
    let mut steps = 0u64;
    loop {
        match step(ctx, thread, rng)? {
            Step::Continue => {}
            Step::Split(child) => spawn(child),
            Step::Exit(exit) => {
                tracing::debug!(pos = %thread.ip.pos, ?exit, steps, "thread exited");
                return Ok(ThreadSummary { exit, steps });
            }
        }
        steps += 1;
    }
}

/// Execute one step of a thread
///
/// Returns `Step::Exit` without executing anything once the instruction
/// pointer is outside the grid.
pub fn step<R: Rng>(
    ctx: &RunContext,
    thread: &mut ThreadState,
    rng: &mut R,
) -> Result<Step, RunError> {
    if !ctx.grid.contains(thread.ip.pos) {
        return Ok(Step::Exit(ThreadExit::LeftGrid));
    }

    let modes = ctx.modes;
    let instruction = ctx.grid.instruction_at(thread.ip.pos);
    tracing::trace!(
        pos = %thread.ip.pos,
        dir = ?thread.ip.dir,
        mp = %thread.mp,
        ?instruction,
        "step"
    );

    let mut result = Step::Continue;

    match instruction {
        Instruction::MemLeft => thread.mp.x -= 1,
        Instruction::MemRight => thread.mp.x += 1,
        Instruction::MemUp if modes.bloated => thread.mp.y -= 1,
        Instruction::MemDown if modes.bloated => thread.mp.y += 1,

        Instruction::Incr => ctx.memory.set(thread.mp, 1, false),
        Instruction::Decr => ctx.memory.set(thread.mp, -1, false),

        Instruction::Lurd => thread.ip.dir = thread.ip.dir.lurd(),
        Instruction::Ruld => thread.ip.dir = thread.ip.dir.ruld(),

        Instruction::Enter if modes.modular => thread.stack.enter(&mut thread.ip, modes.twist),
        Instruction::Leave if modes.modular => {
            if thread.stack.leave(&mut thread.ip, modes.twist) == Leave::Exhausted {
                return Ok(Step::Exit(ThreadExit::Returned));
            }
        }

        Instruction::Skip => thread.ip.advance(),
        Instruction::SkipZero => {
            if ctx.memory.get(thread.mp) == 0 {
                thread.ip.advance();
            }
        }

        Instruction::Split if modes.bloated => {
            // The child starts on the next cell; this thread's own advance
            // below carries it one cell further.
            thread.ip.advance();
            result = Step::Split(thread.split());
        }
        Instruction::Rand if modes.bloated => {
            ctx.memory.set(thread.mp, i64::from(rng.gen::<u8>()), true);
        }

        Instruction::Write => ctx.io.write_byte(ctx.memory.get(thread.mp))?,
        Instruction::Read => match ctx.io.read_byte()? {
            Some(byte) => ctx.memory.set(thread.mp, i64::from(byte), true),
            None if modes.eof_zero => ctx.memory.set(thread.mp, 0, true),
            None => return Ok(Step::Exit(ThreadExit::EndOfInput)),
        },

        _ => {}
    }

    thread.ip.advance();
    Ok(result)
}
