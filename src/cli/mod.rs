//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod meta;
pub mod serve;

pub use args::{Cli, Commands};
