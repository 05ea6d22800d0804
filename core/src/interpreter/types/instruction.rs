//! Instruction set
//!
//! Every character decodes to an instruction. Anything outside the table,
//! including the `$` start marker and out-of-bounds reads, is a no-op.

use serde::{Deserialize, Serialize};

/// Marks the initial instruction pointer position
pub const START_MARKER: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    /// `<`
    MemLeft,
    /// `>`
    MemRight,
    /// `:` (bloated)
    MemUp,
    /// `;` (bloated)
    MemDown,
    /// `+`
    Incr,
    /// `-`
    Decr,
    /// `\`
    Lurd,
    /// `/`
    Ruld,
    /// `@` (modular)
    Enter,
    /// `#` (modular)
    Leave,
    /// `!`
    Skip,
    /// `?`
    SkipZero,
    /// `&` (bloated)
    Split,
    /// `%` (bloated)
    Rand,
    /// `.`
    Write,
    /// `,`
    Read,
    NoOp,
}

impl Instruction {
    pub fn decode(c: char) -> Self {
        match c {
            '<' => Instruction::MemLeft,
            '>' => Instruction::MemRight,
            ':' => Instruction::MemUp,
            ';' => Instruction::MemDown,
            '+' => Instruction::Incr,
            '-' => Instruction::Decr,
            '\\' => Instruction::Lurd,
            '/' => Instruction::Ruld,
            '@' => Instruction::Enter,
            '#' => Instruction::Leave,
            '!' => Instruction::Skip,
            '?' => Instruction::SkipZero,
            '&' => Instruction::Split,
            '%' => Instruction::Rand,
            '.' => Instruction::Write,
            ',' => Instruction::Read,
            _ => Instruction::NoOp,
        }
    }
}

impl From<char> for Instruction {
    fn from(c: char) -> Self {
        Instruction::decode(c)
    }
}
