//! Error types for toread

use thiserror::Error;

/// Result type alias using ToReadError
pub type Result<T> = std::result::Result<T, ToReadError>;

/// Error type alias for convenience
pub type Error = ToReadError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const DUPLICATE: i32 = 4;
    pub const UPSTREAM: i32 = 5;
}

/// Coarse error category, enough for a caller to pick a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Fetch,
    Protocol,
    Duplicate,
    NotFound,
    InvalidInput,
    Persistence,
}

/// Violations of the chat-completion contract
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("LLM request failed: {0}")]
    Transport(String),

    #[error("API request failed with status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Malformed LLM response body: {0}")]
    MalformedBody(String),

    #[error("No response from LLM API")]
    EmptyChoices,

    #[error("Unexpected function call: {0:?}")]
    UnexpectedFunction(Option<String>),

    #[error("Failed to parse function arguments: {0}")]
    Arguments(String),
}

/// Main error type for toread
#[derive(Debug, Error)]
pub enum ToReadError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("URL already collected: {0}")]
    DuplicateCollection(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ToReadError {
    /// Category used to choose how the failure is reported
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::Yaml(_) => ErrorCategory::Configuration,
            Self::Fetch(_) => ErrorCategory::Fetch,
            Self::Protocol(_) => ErrorCategory::Protocol,
            Self::DuplicateCollection(_) => ErrorCategory::Duplicate,
            Self::CollectionNotFound(_) => ErrorCategory::NotFound,
            Self::InvalidInput(_) => ErrorCategory::InvalidInput,
            Self::Database(_) | Self::Io(_) | Self::Serialization(_) | Self::Other(_) => {
                ErrorCategory::Persistence
            }
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::NotFound => exit_codes::NOT_FOUND,
            ErrorCategory::InvalidInput | ErrorCategory::Configuration => {
                exit_codes::INVALID_INPUT
            }
            ErrorCategory::Duplicate => exit_codes::DUPLICATE,
            ErrorCategory::Fetch | ErrorCategory::Protocol => exit_codes::UPSTREAM,
            ErrorCategory::Persistence => exit_codes::GENERAL_ERROR,
        }
    }
}
