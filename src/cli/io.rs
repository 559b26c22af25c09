//! JSON I/O handling for CLI
//!
//! - Input: one JSON document (stdin or file), or one request per line
//! - Output: one JSON envelope per answer on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read a whole JSON document from `input`, or stdin when `None`
pub fn read_document(input: Option<&Path>) -> CliResult<Value> {
    let content = match input {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read input {}: {}", path.display(), e))
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            buffer
        }
    };

    parse_document(&content)
}

fn parse_document(content: &str) -> CliResult<Value> {
    if content.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }
    Ok(serde_json::from_str(content)?)
}

/// Read one JSON request per stdin line; blank lines are skipped
pub fn read_requests() -> impl Iterator<Item = CliResult<Value>> {
    let stdin = io::stdin();
    stdin.lock().lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(serde_json::from_str(&line).map_err(CliError::from)),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value, pretty: bool) -> CliResult<()> {
    write_response_to(&mut io::stdout().lock(), data, pretty)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout().lock(), code, message)
}

fn write_response_to<W: Write>(writer: &mut W, data: Value, pretty: bool) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_envelope(writer, &response, pretty)
}

fn write_error_to<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_envelope(writer, &response, false)
}

fn write_envelope<W: Write>(writer: &mut W, response: &Value, pretty: bool) -> CliResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, response)?;
    } else {
        serde_json::to_writer(&mut *writer, response)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
