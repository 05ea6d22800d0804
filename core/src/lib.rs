pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export main types
pub use interpreter::{ExecutionModes, Interpreter, ProgramGrid, RunReport};
