//! CLI module for vsort
//!
//! Provides command-line interface for:
//! - sort: sort one JSON document by field rules
//! - batch: answer line-delimited sort requests

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, execute, handle_request, run, run_command, sort, SortRequest};
pub use config::SortConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_document, read_requests, write_error, write_response};
