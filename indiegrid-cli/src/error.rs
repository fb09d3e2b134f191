use thiserror::Error;

use indiegrid_catalog::FilterSpecError;
use indiegrid_client::ApiError;
use indiegrid_submit::SubmitError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Backend request failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Submission pipeline failed
    #[error("{0}")]
    Submit(#[from] SubmitError),

    /// Filter arguments do not form a valid specification
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterSpecError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Submission manifest could not be read or parsed
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Bad command-line or interactive input
    #[error("{0}")]
    Input(String),

    /// Command requires an authenticated session
    #[error("Not signed in (run 'indiegrid login' first)")]
    NotSignedIn,

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
