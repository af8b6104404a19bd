//! walkroute CLI library.
//!
//! Argument types, subcommand handlers and output rendering used by the
//! `walkroute-cli` binary.

pub mod commands;
pub mod endpoint;
pub mod output;
