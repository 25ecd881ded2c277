use crate::components::meeting_form::ValidationErrors;
use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(maestro::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(maestro::config))]
    Config(String),

    #[error("Validation failed: {0}")]
    #[diagnostic(code(maestro::validation))]
    Validation(ValidationErrors),

    #[error("Time slot {time} on {date} is already taken")]
    #[diagnostic(
        code(maestro::slot_unavailable),
        help("Pick one of the slots that is still available")
    )]
    SlotUnavailable { date: NaiveDate, time: String },

    #[error("Time slot {0} is not offered")]
    #[diagnostic(code(maestro::unknown_slot))]
    UnknownSlot(String),

    #[error("Meeting not found: {0}")]
    #[diagnostic(code(maestro::not_found))]
    NotFound(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(maestro::storage))]
    Storage(String),

    #[error("Stored meetings changed since version {expected} (now at version {actual})")]
    #[diagnostic(code(maestro::stale_write), help("Reload the meetings and try again"))]
    StaleWrite { expected: u64, actual: u64 },

    #[error("Email error: {0}")]
    #[diagnostic(code(maestro::email))]
    Email(String),

    #[error("Clipboard error: {0}")]
    #[diagnostic(code(maestro::clipboard))]
    Clipboard(String),

    #[error("Completion service error: {0}")]
    #[diagnostic(code(maestro::completion))]
    Completion(String),

    #[error("Completion response does not match the output schema: {0}")]
    #[diagnostic(code(maestro::schema))]
    Schema(String),

    #[error(transparent)]
    #[diagnostic(code(maestro::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(maestro::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(maestro::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(format!("Redis error: {}", err))
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

/// Type alias for Result with our Error type
pub type MaestroResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid or missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create email errors
pub fn email_error(message: &str) -> Error {
    Error::Email(message.to_string())
}

/// Helper to create clipboard errors
pub fn clipboard_error(message: &str) -> Error {
    Error::Clipboard(message.to_string())
}

/// Helper to create completion service errors
pub fn completion_error(message: &str) -> Error {
    Error::Completion(message.to_string())
}

/// Helper to create schema violation errors
pub fn schema_error(message: &str) -> Error {
    Error::Schema(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
