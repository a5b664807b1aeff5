//! Command-line interface module.

mod args;
pub mod common;
pub mod enhance;
pub mod navigate;
pub mod query;

pub use args::{Cli, Commands, EnhanceArgs, InputArgs, QueryTarget};
