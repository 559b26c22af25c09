//! CLI-specific error types

use std::fmt;
use std::io;

use crate::sort::SortError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/input file)
    IoError,
    /// Input is not a usable document or request
    InvalidInput,
    /// Input exceeds the configured element limit
    InputTooLarge,
    /// A sort rule failed
    SortFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "VSORT_CLI_CONFIG_ERROR",
            Self::IoError => "VSORT_CLI_IO_ERROR",
            Self::InvalidInput => "VSORT_CLI_INVALID_INPUT",
            Self::InputTooLarge => "VSORT_CLI_INPUT_TOO_LARGE",
            Self::SortFailed => "VSORT_CLI_SORT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Input larger than `max_elements`
    pub fn input_too_large(elements: usize, max_elements: usize) -> Self {
        Self::new(
            CliErrorCode::InputTooLarge,
            format!(
                "Input has {} elements; max_elements is {}",
                elements, max_elements
            ),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

impl From<SortError> for CliError {
    fn from(e: SortError) -> Self {
        Self::new(CliErrorCode::SortFailed, format!("[{}] {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("max_elements must be > 0");
        assert_eq!(
            err.to_string(),
            "VSORT_CLI_CONFIG_ERROR: max_elements must be > 0"
        );
    }

    #[test]
    fn test_from_sort_error() {
        let err: CliError = SortError::invalid_rule_kind::<u8>("name").into();
        assert_eq!(err.code(), &CliErrorCode::SortFailed);
        assert!(err.message().starts_with("[SORT_INVALID_RULE_KIND]"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert_eq!(err.code_str(), "VSORT_CLI_INVALID_INPUT");
    }

    #[test]
    fn test_input_too_large_message() {
        let err = CliError::input_too_large(10, 5);
        assert_eq!(err.code(), &CliErrorCode::InputTooLarge);
        assert!(err.message().contains("10"));
    }
}
