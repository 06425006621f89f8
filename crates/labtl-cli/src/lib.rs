//! Library side of the `labtl` command: configuration, logging, and the
//! work behind each subcommand.

pub mod commands;
pub mod config;
pub mod logging;
