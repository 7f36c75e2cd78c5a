//! Command-line front end for the ti time tracker.
//!
//! Argument parsing, configuration and one module per subcommand. Commands
//! write their output to a caller-supplied writer so they can be tested
//! without a terminal.

mod cli;
pub mod color;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use color::Colorizer;
pub use config::Config;
