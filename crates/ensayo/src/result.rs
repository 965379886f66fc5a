//! Result and error types for Ensayo.

use thiserror::Error;

/// Result type for suite operations
pub type EnsayoResult<T> = Result<T, EnsayoError>;

/// Errors that can occur while driving the suite.
///
/// Every variant is terminal for the current scenario step; there is no
/// retry layer above the driver's own polling timeouts.
#[derive(Debug, Error)]
pub enum EnsayoError {
    /// No DOM element matched the selector within the lookup timeout
    #[error("no element matched selector {selector:?}")]
    LookupFailed {
        /// Canonical selector text
        selector: String,
    },

    /// Element found but the asserted condition did not hold
    #[error("assertion failed: {message}")]
    AssertionFailed {
        /// What was expected and what was observed
        message: String,
    },

    /// Browser navigation failed or never reached the target
    #[error("navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A polling wait exceeded its deadline
    #[error("timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of the awaited condition
        waiting_for: String,
    },

    /// Keystrokes or file input rejected by the target element
    #[error("input rejected for {selector:?}: {message}")]
    InputError {
        /// Canonical selector text
        selector: String,
        /// Error message
        message: String,
    },

    /// Fixture file missing or malformed
    #[error("fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// Screenshot capture failed
    #[error("screenshot failed: {message}")]
    ScreenshotError {
        /// Error message
        message: String,
    },

    /// In-page script evaluation failed
    #[error("script evaluation failed: {message}")]
    EvalError {
        /// Error message
        message: String,
    },

    /// Configuration file missing or malformed
    #[error("config error: {message}")]
    ConfigError {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnsayoError {
    /// Build an assertion failure from a formatted message.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Whether this error came from a polling deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
