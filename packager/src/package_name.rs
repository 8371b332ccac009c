//! Package name newtype.
//!
//! Names must be non-empty, start with a lowercase letter or digit, and
//! contain only lowercase ASCII letters, digits, `-`, `_` and `.`.

use crate::error::{DescriptorError, Result};
use std::fmt;

/// A validated package identifier.
///
/// # Examples
///
/// ```
/// use addon_packager::package_name::PackageName;
///
/// let name: PackageName = "godot-json-editor".try_into().unwrap();
/// assert_eq!(name.as_str(), "godot-json-editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PackageName {
    type Error = DescriptorError;

    fn try_from(value: &str) -> Result<Self> {
        validate_package_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PackageName {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self> {
        validate_package_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.')
}

fn validate_package_name(value: &str) -> Result<()> {
    let invalid = |reason: String| DescriptorError::InvalidName {
        value: value.to_owned(),
        reason,
    };

    let Some(first) = value.chars().next() else {
        return Err(invalid("name must not be empty".to_owned()));
    };
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return Err(invalid(format!(
            "name must start with a lowercase letter or digit, got '{first}'"
        )));
    }
    if let Some(bad) = value.chars().find(|c| !is_name_char(*c)) {
        return Err(invalid(format!("unexpected character '{bad}'")));
    }
    Ok(())
}
