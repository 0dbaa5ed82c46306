//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing credentials or unusable settings; raised before any request.
    #[error("{0}")]
    Config(String),

    /// A client call failed; `context` names what the command was doing.
    #[error("{context}: {source}")]
    Operation {
        context: &'static str,
        #[source]
        source: ApplicationError,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Wrap a client failure with command context.
    pub fn operation(context: &'static str) -> impl FnOnce(ApplicationError) -> CliError {
        move |source| CliError::Operation { context, source }
    }

    /// Every handled failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        crate::exitcode::FAILURE
    }
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Config { message } => CliError::Config(message),
            other => CliError::Operation {
                context: "Error",
                source: other,
            },
        }
    }
}
