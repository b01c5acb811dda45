use thiserror::Error;

/// Errors a task raises while reading its arguments or doing its work.
///
/// Returning any of these from `Task::run` aborts the whole invocation; a task
/// that merely wants to report failure sets `RunResult::Failed` instead.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("'{0}' is not a declared parameter")]
    InvalidParam(String),

    #[error("missing value for parameter '{0}'")]
    MissingParam(String),

    #[error("'--{0}' is not a declared flag")]
    InvalidFlag(String),

    #[error("required flag '--{0}' was not provided")]
    MissingRequiredFlag(String),

    #[error("invalid value '{value}' for flag '--{flag}': {reason}")]
    InvalidFlagValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for task operations
pub type TaskResult<T> = Result<T, TaskError>;
