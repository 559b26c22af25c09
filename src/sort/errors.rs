//! Sort error types
//!
//! Error codes:
//! - SORT_INVALID_RULE_KIND (ERROR)
//! - SORT_RULE_FAILED (ERROR)

use thiserror::Error;

/// Boxed error produced by a fallible caller rule
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Errors surfaced by a sort session
#[derive(Debug, Error)]
pub enum SortError {
    /// A field rule was evaluated against an element type that has no fields
    #[error("Invalid rule kind: field '{field}' cannot be read from {element_type}")]
    InvalidRuleKind {
        /// Field the rule tried to read
        field: String,
        /// Type name of the element that rejected the lookup
        element_type: &'static str,
    },

    /// A caller-supplied comparator or key extractor returned an error
    #[error("Rule evaluation failed: {0}")]
    RuleFailed(#[source] BoxError),
}

impl SortError {
    /// Create an invalid rule kind error for the given element type
    pub fn invalid_rule_kind<T: ?Sized>(field: impl Into<String>) -> Self {
        SortError::InvalidRuleKind {
            field: field.into(),
            element_type: std::any::type_name::<T>(),
        }
    }

    /// Wrap a caller rule failure
    pub fn rule_failed(source: impl Into<BoxError>) -> Self {
        SortError::RuleFailed(source.into())
    }

    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SortError::InvalidRuleKind { .. } => "SORT_INVALID_RULE_KIND",
            SortError::RuleFailed(_) => "SORT_RULE_FAILED",
        }
    }

    /// Returns the caller's original error, if this wraps one
    pub fn into_rule_error(self) -> Option<BoxError> {
        match self {
            SortError::RuleFailed(source) => Some(source),
            _ => None,
        }
    }
}
