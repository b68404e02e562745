//! Terminal front end: argument parsing, command dispatch and rendering.

pub mod chart;
pub mod commands;
pub mod output;
pub mod table;
pub mod views;

pub use commands::{parse_args, run, Command, Invocation, USAGE};
