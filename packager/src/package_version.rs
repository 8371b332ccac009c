//! Semantic version newtype for package identity.
//!
//! Accepts `MAJOR.MINOR.PATCH` with an optional `-PRERELEASE` and an
//! optional `+BUILD` suffix. Numeric components may not carry leading zeros.

use crate::error::{DescriptorError, Result};
use std::fmt;

/// A validated semantic version string.
///
/// # Examples
///
/// ```
/// use addon_packager::package_version::PackageVersion;
///
/// let version: PackageVersion = "1.2.0".try_into().unwrap();
/// assert_eq!(version.as_str(), "1.2.0");
/// assert!(PackageVersion::try_from("1.2").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion(String);

impl PackageVersion {
    /// Return the version as written in the descriptor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PackageVersion {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        parse_version(value)
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        parse_version(&value)
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_version(value: &str) -> Result<PackageVersion> {
    let invalid = |reason: String| DescriptorError::InvalidVersion {
        value: value.to_owned(),
        reason,
    };

    let (without_build, build) = match value.split_once('+') {
        Some((head, build)) => (head, Some(build)),
        None => (value, None),
    };
    let (core, pre) = match without_build.split_once('-') {
        Some((head, pre)) => (head, Some(pre)),
        None => (without_build, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(invalid(format!(
            "expected MAJOR.MINOR.PATCH, found {} component(s)",
            parts.len()
        )));
    };

    for (label, suffix) in [("pre-release", pre), ("build metadata", build)] {
        if let Some(ids) = suffix {
            validate_identifiers(ids).map_err(|reason| invalid(format!("{label}: {reason}")))?;
        }
    }

    for component in [major, minor, patch] {
        check_numeric(component).map_err(&invalid)?;
    }

    Ok(PackageVersion(value.to_owned()))
}

fn check_numeric(component: &str) -> std::result::Result<(), String> {
    if component.is_empty() {
        return Err("numeric component must not be empty".to_owned());
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(format!("numeric component '{component}' has a leading zero"));
    }
    component
        .parse::<u64>()
        .map(drop)
        .map_err(|e| format!("numeric component '{component}': {e}"))
}

fn validate_identifiers(ids: &str) -> std::result::Result<(), String> {
    for id in ids.split('.') {
        if id.is_empty() {
            return Err("identifiers must not be empty".to_owned());
        }
        if let Some(bad) = id.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(format!("unexpected character '{bad}'"));
        }
    }
    Ok(())
}
