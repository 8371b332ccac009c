//! Error types for packaging runs.
//!
//! Every failure aborts the whole run. [`PackagingError::category`] folds the
//! variants onto the two classes callers act on: configuration mistakes,
//! which need a descriptor fix, and I/O failures, which are safe to retry
//! because packaging is a pure copy.

use crate::error::DescriptorError;
use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`PackagingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The descriptor or invocation is wrong; retrying will not help.
    Configuration,
    /// The source could not be read or the destination could not be written.
    Io,
}

/// Errors arising from packaging operations.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// A descriptor field failed validation.
    #[error("configuration error: {0}")]
    Configuration(#[from] DescriptorError),

    /// A descriptor file could not be read or parsed.
    #[error("invalid descriptor file {path}: {reason}")]
    InvalidDescriptorFile {
        /// Path to the descriptor file.
        path: Utf8PathBuf,
        /// Description of the read or parse failure.
        reason: String,
    },

    /// The destination lies inside the payload it would receive.
    #[error("destination {destination} lies inside payload root {payload_root}")]
    DestinationInsidePayload {
        /// The requested destination.
        destination: Utf8PathBuf,
        /// The payload root it overlaps.
        payload_root: Utf8PathBuf,
    },

    /// The destination encloses payload files; replacing it would delete
    /// the originals.
    #[error("destination {destination} contains payload at {payload}; replacing it would delete the source")]
    DestinationContainsPayload {
        /// The requested destination.
        destination: Utf8PathBuf,
        /// The payload root or payload file it encloses.
        payload: Utf8PathBuf,
    },

    /// The payload root (or the source root holding it) does not exist.
    #[error("payload root {path} does not exist")]
    PayloadRootMissing {
        /// Path that was expected to exist.
        path: Utf8PathBuf,
    },

    /// A payload file or directory could not be read.
    #[error("failed to read payload at {path}")]
    PayloadUnreadable {
        /// Path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A payload path is not valid UTF-8 and cannot be represented in the
    /// package layout.
    #[error("payload path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The destination could not be created or written.
    #[error("failed to write package destination {path}")]
    DestinationUnwritable {
        /// Path that could not be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O operation failed.
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),
}

impl PackagingError {
    /// Classify this error as a configuration or I/O failure.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_)
            | Self::InvalidDescriptorFile { .. }
            | Self::DestinationInsidePayload { .. }
            | Self::DestinationContainsPayload { .. } => ErrorCategory::Configuration,
            Self::PayloadRootMissing { .. }
            | Self::PayloadUnreadable { .. }
            | Self::NonUtf8Path { .. }
            | Self::DestinationUnwritable { .. }
            | Self::WriteFailed { .. }
            | Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Result type alias using [`PackagingError`].
pub type Result<T> = std::result::Result<T, PackagingError>;
