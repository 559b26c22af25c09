//! CLI command implementations
//!
//! `sort` answers a single document; `batch` answers one request per line
//! and keeps going after a failed request.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use super::args::Command;
use super::config::SortConfig;
use super::errors::{CliError, CliResult};
use super::io::{read_document, read_requests, write_error, write_response};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::sort::{sort_json, Direction, SortSpec, SortStats};

/// A batch request line
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SortRequest {
    /// Document to sort
    pub data: Value,
    /// Field rules, highest priority first
    #[serde(default)]
    pub by: Vec<SortSpec>,
    /// Final direction; falls back to the configured default
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Sort {
            config,
            input,
            by,
            direction,
        } => sort(config.as_deref(), input.as_deref(), &by, direction),
        Command::Batch { config } => batch(config.as_deref()),
    }
}

/// Sort one document and write it to stdout
///
/// Every failure, including config and input errors, is answered with an
/// error envelope before it is returned.
pub fn sort(
    config_path: Option<&Path>,
    input: Option<&Path>,
    by: &[SortSpec],
    direction: Option<Direction>,
) -> CliResult<()> {
    let outcome = load_config(config_path).and_then(|config| {
        let document = read_document(input)?;
        let direction = direction.unwrap_or(config.default_direction);
        let (sorted, _) = execute(document, by, direction, &config)?;
        Ok((sorted, config.pretty))
    });

    match outcome {
        Ok((sorted, pretty)) => write_response(sorted, pretty),
        Err(e) => {
            report_failure(&e)?;
            Err(e)
        }
    }
}

/// Answer sort requests from stdin until it closes
pub fn batch(config_path: Option<&Path>) -> CliResult<()> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            report_failure(&e)?;
            return Err(e);
        }
    };

    for request in read_requests() {
        let outcome = request.and_then(|request| handle_request(request, &config));
        match outcome {
            Ok(response) => write_response(response, config.pretty)?,
            Err(e) => report_failure(&e)?,
        }
    }

    Ok(())
}

/// Log a failed request and answer it with an error envelope
fn report_failure(err: &CliError) -> CliResult<()> {
    log_event_with_fields(
        Event::RequestFailed,
        &[("code", err.code_str()), ("reason", err.message())],
    );
    write_error(err.code_str(), err.message())
}

/// Answer one batch request
pub fn handle_request(request: Value, config: &SortConfig) -> CliResult<Value> {
    let request: SortRequest = serde_json::from_value(request)
        .map_err(|e| CliError::invalid_input(format!("Invalid sort request: {}", e)))?;

    let direction = request.direction.unwrap_or(config.default_direction);
    let (sorted, stats) = execute(request.data, &request.by, direction, config)?;

    Ok(json!({
        "sorted": sorted,
        "stats": stats,
    }))
}

/// Check limits and sort a document
pub fn execute(
    document: Value,
    by: &[SortSpec],
    direction: Direction,
    config: &SortConfig,
) -> CliResult<(Value, SortStats)> {
    let elements = element_count(&document);
    if elements > config.max_elements {
        let err = CliError::input_too_large(elements, config.max_elements);
        log_event_with_fields(Event::InputRejected, &[("reason", err.message())]);
        return Err(err);
    }

    let elements = elements.to_string();
    log_event_with_fields(Event::InputLoaded, &[("elements", elements.as_str())]);

    let (sorted, stats) = sort_json(document, by, direction)?;

    log_event(Event::OutputWritten);
    Ok((sorted, stats))
}

/// Number of elements a document contributes to a sort
fn element_count(document: &Value) -> usize {
    match document {
        Value::Null => 0,
        Value::Array(items) => items.len(),
        Value::Object(members) => members.len(),
        _ => 1,
    }
}

fn load_config(path: Option<&Path>) -> CliResult<SortConfig> {
    let config = SortConfig::load_or_default(path)?;
    Logger::set_min_severity(config.severity()?);

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("log_level", config.log_level.as_str()),
            ("source", source.as_str()),
        ],
    );

    Ok(config)
}
