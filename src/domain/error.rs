use std::fmt;
use std::io;

use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn describe_fields(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Library-wide error type for eduprompt operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Input rejected before any prompt text was built.
    #[error("Invalid input: {}", describe_fields(.0))]
    Validation(Vec<FieldError>),

    /// Library entry does not exist.
    #[error("Prompt '{0}' not found")]
    NotFound(String),

    /// Caller is not allowed to touch the entry.
    #[error("User '{user}' is not allowed to {action} prompt '{id}'")]
    Unauthorized { user: String, action: &'static str, id: String },

    /// Persistence backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unknown target tool name.
    #[error(
        "Unknown target tool '{0}': must be one of chatgpt, gemini, copilot, canva-ai, gamma-app"
    )]
    UnknownTool(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub(crate) fn unauthorized(user: &str, action: &'static str, id: impl ToString) -> Self {
        AppError::Unauthorized { user: user.to_string(), action, id: id.to_string() }
    }

    /// Fields rejected by validation, empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::UnknownTool(_)
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::NotFound(_) => io::ErrorKind::NotFound,
            AppError::Unauthorized { .. } => io::ErrorKind::PermissionDenied,
            AppError::Json(_) | AppError::Yaml(_) => io::ErrorKind::InvalidData,
            AppError::Storage(_) => io::ErrorKind::Other,
        }
    }
}
