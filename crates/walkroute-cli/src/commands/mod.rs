//! Handlers for the CLI subcommands.
//!
//! `main.rs` parses arguments and loads the network; each handler here takes
//! the loaded state and writes its result to stdout.

pub mod info;
pub mod nearest;
pub mod route;
