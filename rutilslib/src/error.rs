//! Error types for rutilslib

use thiserror::Error;

/// Errors that can occur in rutilslib helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RutilsError {
    /// Input string was empty where a first character is required
    #[error("there is no first letter in an empty string")]
    EmptyString,

    /// Color could not be parsed from text
    #[error("invalid color '{input}': {message}")]
    InvalidColor { input: String, message: String },
}
