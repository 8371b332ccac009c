//! Package descriptor: identity, version, source location and payload rule.
//!
//! A [`PackageDescriptor`] is the static record a recipe hands out from
//! `describe()`. It holds plain strings so that describing a package can
//! never fail; [`PackageDescriptor::validate`] turns it into a
//! [`ValidatedDescriptor`] at the start of a packaging run, which is where
//! configuration mistakes surface.
//!
//! Descriptors can also be read from TOML:
//!
//! ```toml
//! name = "godot-json-editor"
//! version = "1.2.0"
//! source_url = "https://github.com/hnOsmium0001/godot-json-editor"
//! payload_root = "addons/json_editor/*"
//! ```

use crate::error::DescriptorError;
use crate::package_name::PackageName;
use crate::package_version::PackageVersion;
use crate::packaging_error::{PackagingError, Result};
use crate::payload::PayloadPattern;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// Static package metadata and payload selection rule.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq, Hash)]
#[serde(deny_unknown_fields)]
pub struct PackageDescriptor {
    name: String,
    version: String,
    source_url: String,
    payload_root: String,
}

impl PackageDescriptor {
    /// Create a descriptor from its four fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_packager::descriptor::PackageDescriptor;
    ///
    /// let descriptor = PackageDescriptor::new(
    ///     "godot-json-editor",
    ///     "1.2.0",
    ///     "https://github.com/hnOsmium0001/godot-json-editor",
    ///     "addons/json_editor/*",
    /// );
    /// assert_eq!(descriptor.name(), "godot-json-editor");
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        source_url: impl Into<String>,
        payload_root: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            source_url: source_url.into(),
            payload_root: payload_root.into(),
        }
    }

    /// Package identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semantic version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Glob or directory selecting the payload files.
    #[must_use]
    pub fn payload_root(&self) -> &str {
        &self.payload_root
    }

    /// Return the `(name, version, source_url)` identity triple.
    #[must_use]
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.version, &self.source_url)
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`DescriptorError`] encountered, checking name,
    /// version, source URL and payload pattern in that order.
    pub fn validate(&self) -> std::result::Result<ValidatedDescriptor, DescriptorError> {
        let name = PackageName::try_from(self.name.as_str())?;
        let version = PackageVersion::try_from(self.version.as_str())?;
        if self.source_url.trim().is_empty() {
            return Err(DescriptorError::EmptySourceUrl);
        }
        let payload = PayloadPattern::new(&self.payload_root)?;
        Ok(ValidatedDescriptor {
            name,
            version,
            payload,
        })
    }

    /// Parse a descriptor from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML parser's error for malformed input, missing fields or
    /// unknown keys.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Read and parse a descriptor file.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::InvalidDescriptorFile`] if the file cannot be
    /// read or parsed. Field validation is deferred to [`Self::validate`].
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let invalid = |reason: String| PackagingError::InvalidDescriptorFile {
            path: path.to_owned(),
            reason,
        };
        let source = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        Self::from_toml_str(&source).map_err(|e| invalid(e.message().to_owned()))
    }
}

/// A descriptor whose fields have all passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedDescriptor {
    name: PackageName,
    version: PackageVersion,
    payload: PayloadPattern,
}

impl ValidatedDescriptor {
    /// Validated package name.
    #[must_use]
    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Validated package version.
    #[must_use]
    pub fn version(&self) -> &PackageVersion {
        &self.version
    }

    /// Parsed payload selection rule.
    #[must_use]
    pub fn payload(&self) -> &PayloadPattern {
        &self.payload
    }
}
