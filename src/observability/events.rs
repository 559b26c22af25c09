//! Observable events for vanilla-sort
//!
//! Events are explicit and typed; each carries the severity it is logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Sorting
    /// A session produced its output
    SortComplete,
    /// A rule failed and the sort was aborted
    SortFailed,

    // Requests
    /// A CLI request was answered with an error
    RequestFailed,

    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // CLI input/output
    /// Input document parsed
    InputLoaded,
    /// Input document rejected before sorting
    InputRejected,
    /// Sorted document written
    OutputWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SortComplete => "SORT_COMPLETE",
            Event::SortFailed => "SORT_FAILED",
            Event::RequestFailed => "REQUEST_FAILED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::InputLoaded => "INPUT_LOADED",
            Event::InputRejected => "INPUT_REJECTED",
            Event::OutputWritten => "OUTPUT_WRITTEN",
        }
    }

    /// Severity the event is logged at
    ///
    /// Library events stay at Trace so sessions are silent by default;
    /// the CLI reports failures itself.
    pub fn severity(&self) -> Severity {
        match self {
            Event::SortComplete
            | Event::SortFailed
            | Event::InputLoaded
            | Event::OutputWritten => Severity::Trace,
            Event::ConfigLoaded => Severity::Info,
            Event::InputRejected | Event::RequestFailed => Severity::Error,
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SortFailed | Event::InputRejected | Event::RequestFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
