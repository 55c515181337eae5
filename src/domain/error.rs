use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    ValidationError(String),
    ConfigError(String),
    ParseError(String),
    /// Transport or HTTP failure talking to the agent service.
    AgentError(String),
    /// An error marker arrived inside the agent response stream.
    AgentStream(String),
    /// Extraction was attempted on an empty string.
    EmptyInput,
    /// No `{...}` span in the cleaned text; carries its first 200 characters.
    NoJsonObject(String),
    TodoApiError(String),
    MissingSlot(String),
    UnhandledRequest(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::AgentError(msg) => write!(f, "Agent error: {}", msg),
            AppError::AgentStream(msg) => write!(f, "Agent stream error: {}", msg),
            AppError::EmptyInput => write!(f, "Empty agent output"),
            AppError::NoJsonObject(head) => write!(f, "No JSON object found. head={}", head),
            AppError::TodoApiError(msg) => write!(f, "Todo API error: {}", msg),
            AppError::MissingSlot(name) => write!(f, "Missing slot value: {}", name),
            AppError::UnhandledRequest(msg) => {
                write!(f, "Unable to find a suitable request handler: {}", msg)
            }
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
