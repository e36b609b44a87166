//! Error types for the countdown library

use thiserror::Error;

/// Errors surfaced while setting up countdown widgets.
///
/// Nothing in the tick path can fail; these only come from the entry point.
#[derive(Debug, Error)]
pub enum CountdownError {
    /// Override values could not be turned into countdown parameters
    #[error("invalid countdown options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// Selector string could not be parsed
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Widgets were started outside a tokio runtime
    #[error("countdown widgets must be started from within a tokio runtime")]
    NoRuntime,
}

impl CountdownError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
