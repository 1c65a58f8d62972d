//! Command-line interface definitions.
//!
//! - `Cli`: flag definitions via clap, converted into configuration overrides
//! - `Display`: formatted terminal output with colors

mod commands;
mod display;

pub use commands::Cli;
pub use display::Display;
