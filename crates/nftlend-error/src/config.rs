// Configuration errors

use thiserror::Error;
use crate::{BoxError, ErrorCode, ErrorDomain, LendingError};

/// Configuration error codes
pub mod codes {
    use crate::ErrorCode;

    // Config error codes start with 4000
    pub const IO: ErrorCode = ErrorCode(4001);
    pub const PARSE: ErrorCode = ErrorCode(4002);
    pub const INVALID: ErrorCode = ErrorCode(4003);
}

/// Configuration error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl LendingError for ConfigError {
    fn code(&self) -> ErrorCode {
        use codes::*;
        match self {
            ConfigError::Io { .. } => IO,
            ConfigError::Parse(_) => PARSE,
            ConfigError::Invalid(_) => INVALID,
        }
    }

    fn domain(&self) -> ErrorDomain {
        ErrorDomain::Config
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for BoxError {
    fn from(err: ConfigError) -> Self {
        Box::new(err)
    }
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid(message.into())
    }
}
