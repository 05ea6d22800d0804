//! Tests for the interpreter
//!
//! Organized by language flavour

pub(crate) mod helpers;

mod io_tests;
