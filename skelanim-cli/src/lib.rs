//! skelanim CLI library
//!
//! Command implementations and display helpers for the `skelanim` binary.

pub mod cli;
pub mod commands;
pub mod utils;
