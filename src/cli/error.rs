//! CLI-level errors (wraps library and config errors)

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Config(#[from] ConfigLoadError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::ScriptRead(_) => crate::exitcode::NOINPUT,
                TreeError::Script { .. } | TreeError::ValueNotFound { .. } => {
                    crate::exitcode::DATAERR
                }
                TreeError::PastEnd { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
