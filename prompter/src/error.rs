//! Error types for prompter.
//!
//! Rejected user input is not an error here: it is reported through the
//! configured messages and resolved by re-prompting or returning `None`.
//! The types below cover what the caller has to deal with.

use std::{io, path::PathBuf};
use thiserror::Error;

/// A malformed request configuration.
///
/// This is a programmer error: the request is never prompted and never
/// retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON configuration could not be read into [`crate::Options`].
    #[error("Malformed options: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The option is set on a request kind it does not apply to.
    #[error("Option `{option}` does not apply to {kind} requests")]
    NotApplicable {
        option: &'static str,
        kind: crate::Kind,
    },

    /// The option value is out of its domain.
    #[error("Invalid value for `{option}`: {reason}")]
    InvalidValue {
        option: &'static str,
        reason: String,
    },

    /// The file-open mode is not one of `r`, `w`, `a`, `x` with optional `+` and `b`/`t`.
    #[error("Invalid file mode: {0:?}")]
    InvalidMode(String),
}

/// Errors returned by [`crate::Terminal`] operations.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Couldn't read or write the terminal: {0}")]
    Io(#[from] io::Error),

    #[error("Couldn't open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PromptError {
    /// `true` for the fatal configuration class of errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for prompter operations.
pub type Result<T> = std::result::Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;

    #[test]
    fn test_error_not_applicable_display() {
        let e = ConfigError::NotApplicable {
            option: "min",
            kind: Kind::String,
        };
        assert_eq!(
            e.to_string(),
            "Option `min` does not apply to string requests"
        );
    }

    #[test]
    fn test_error_prompt_error_from_config() {
        let e: PromptError = ConfigError::InvalidMode("q".to_string()).into();
        assert!(e.is_config());
        assert_eq!(
            e.to_string(),
            "Configuration error: Invalid file mode: \"q\""
        );
    }
}
