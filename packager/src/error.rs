//! Error types for package descriptor validation.
//!
//! Each variant names the offending value and the constraint it violated so
//! that a failed packaging run points straight at the descriptor field to fix.

use thiserror::Error;

/// Errors arising from invalid descriptor fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The package name is empty or contains characters outside the
    /// accepted set.
    #[error("invalid package name \"{value}\": {reason}")]
    InvalidName {
        /// The rejected name.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// The version string is not a semantic version.
    #[error("invalid package version \"{value}\": {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// The source URL is empty or whitespace.
    #[error("source URL must not be empty")]
    EmptySourceUrl,

    /// The payload glob is empty or malformed.
    #[error("invalid payload pattern \"{pattern}\": {reason}")]
    InvalidPayloadPattern {
        /// The rejected glob.
        pattern: String,
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`DescriptorError`].
pub type Result<T> = std::result::Result<T, DescriptorError>;
