//! Command-line front end standing in for the view layer.

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::{run, CliError};
