use thiserror::Error;
use trellis_protocol::TaskError;

/// The main error type for Trellis engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No command specified")]
    NoCommand,

    #[error("'{0}' is not an available command")]
    UnknownCommand(String),

    #[error("Task '{parent}' depends on '{dependency}', which is not registered")]
    InvalidDependency { parent: String, dependency: String },

    #[error("Task '{command}' is missing params: {}", .missing.join(", "))]
    MissingParams {
        command: String,
        missing: Vec<String>,
    },

    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    #[error("Invalid definition for task '{command}': {reason}")]
    InvalidDefinition { command: String, reason: String },

    #[error("Task '{command}' aborted: {source}")]
    Task {
        command: String,
        #[source]
        source: TaskError,
    },
}

impl EngineError {
    /// Short heading printed above the error message on the console.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO error",
            Self::Yaml(_) | Self::Config(_) => "Configuration error",
            Self::NoCommand => "No command specified",
            Self::UnknownCommand(_) => "Invalid command specified",
            Self::InvalidDependency { .. } => "Invalid dependency",
            Self::MissingParams { .. } => "Missing params",
            Self::DependencyCycle { .. } => "Dependency cycle",
            Self::InvalidDefinition { .. } => "Invalid task definition",
            Self::Task { source, .. } => match source {
                TaskError::InvalidParam(_) => "Invalid param",
                TaskError::MissingParam(_) => "Missing params",
                TaskError::InvalidFlag(_) => "Invalid flag",
                TaskError::MissingRequiredFlag(_) => "Missing required flag",
                TaskError::InvalidFlagValue { .. } => "Invalid flag value",
                TaskError::Io(_) | TaskError::Other(_) => "Task error",
            },
        }
    }

    /// Whether the console report should be followed by the command list.
    pub fn lists_commands(&self) -> bool {
        matches!(self, Self::NoCommand | Self::UnknownCommand(_))
    }
}

/// Result type alias for Trellis engine operations
pub type EngineResult<T> = Result<T, EngineError>;
