// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataflow CEP Error Types
//!
//! Error handling for the input/output adapters and configuration layer. The
//! pattern engine itself never fails: rejected transitions are reported through
//! [`crate::core::pattern::Transition`] instead.

use thiserror::Error;

/// Result type for adapter and configuration operations
pub type CepResult<T> = Result<T, CepError>;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum CepError {
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        config_key: Option<String>,
    },

    #[error("Invalid parameter '{parameter:?}': {message}")]
    InvalidParameter {
        message: String,
        parameter: Option<String>,
    },

    #[error("Mapping failed at line {line}: {message}")]
    MappingFailed { message: String, line: usize },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl CepError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: None,
        }
    }

    /// Create a configuration error with a specific key
    pub fn configuration_with_key(message: impl Into<String>, config_key: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: Some(config_key.into()),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            parameter: Some(parameter.into()),
        }
    }

    /// Create a mapping error for a 1-based input line
    pub fn mapping_failed(message: impl Into<String>, line: usize) -> Self {
        Self::MappingFailed {
            message: message.into(),
            line,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a generic error from a string
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
