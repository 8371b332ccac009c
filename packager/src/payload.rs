//! Payload selection.
//!
//! A [`PayloadPattern`] names the files that make up a package. Patterns are
//! matched against `/`-separated paths relative to the source root, with
//! `fnmatch`-style semantics: `*` also crosses directory separators, so
//! `addons/json_editor/*` selects the whole addon tree. A wildcard-free
//! pattern names a directory (or a single file) and selects everything
//! beneath it.

use crate::error::{DescriptorError, Result as DescriptorResult};
use crate::packaging_error::{PackagingError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern};
use log::{debug, trace};
use std::fmt;
use std::path::Path;
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

const GLOB_META: [char; 3] = ['*', '?', '['];

/// A validated payload selection rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPattern {
    raw: String,
    pattern: Pattern,
}

impl PayloadPattern {
    /// Parse and validate a payload glob.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidPayloadPattern`] when the pattern is
    /// empty, malformed, absolute, or climbs out of the source root.
    ///
    /// # Examples
    ///
    /// ```
    /// use addon_packager::payload::PayloadPattern;
    ///
    /// let pattern = PayloadPattern::new("addons/json_editor/*").unwrap();
    /// assert!(pattern.matches("addons/json_editor/icons/tree.svg"));
    /// assert!(!pattern.matches("addons/other/plugin.gd"));
    /// ```
    pub fn new(raw: &str) -> DescriptorResult<Self> {
        let invalid = |reason: String| DescriptorError::InvalidPayloadPattern {
            pattern: raw.to_owned(),
            reason,
        };

        let mut normalised = raw.trim().trim_end_matches('/');
        while let Some(rest) = normalised.strip_prefix("./") {
            normalised = rest;
        }
        if normalised.is_empty() {
            return Err(invalid("pattern must not be empty".to_owned()));
        }
        if normalised.starts_with('/') || Path::new(normalised).is_absolute() {
            return Err(invalid(
                "pattern must be relative to the source root".to_owned(),
            ));
        }
        if normalised.split('/').any(|component| component == "..") {
            return Err(invalid(
                "pattern must not leave the source root".to_owned(),
            ));
        }
        let pattern = Pattern::new(normalised).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            raw: normalised.to_owned(),
            pattern,
        })
    }

    /// Return the pattern as written, without surrounding whitespace or a
    /// trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Return true when the pattern contains no wildcards.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !self.raw.contains(GLOB_META)
    }

    /// Return the longest wildcard-free directory prefix of the pattern.
    ///
    /// This is the directory that must exist for the payload to be found:
    /// `addons/json_editor` for `addons/json_editor/*`, and the empty path for
    /// a pattern such as `*.gd`.
    #[must_use]
    pub fn root_prefix(&self) -> Utf8PathBuf {
        self.raw
            .split('/')
            .take_while(|component| !component.contains(GLOB_META))
            .filter(|component| !component.is_empty())
            .collect()
    }

    /// Resolve the payload root against `source_root`.
    #[must_use]
    pub fn payload_root(&self, source_root: &Utf8Path) -> Utf8PathBuf {
        source_root.join(self.root_prefix())
    }

    /// Return true if the `/`-separated relative path belongs to the payload.
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        if self.pattern.matches_with(relative, MATCH_OPTIONS) {
            return true;
        }
        self.is_literal()
            && relative
                .strip_prefix(self.raw.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for PayloadPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A single file selected for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    /// Path relative to the source root; also the path inside the package.
    pub relative_path: Utf8PathBuf,
    /// Absolute or caller-relative path of the original file.
    pub source_path: Utf8PathBuf,
}

/// Enumerate every file under `source_root` selected by `pattern`.
///
/// Directories are walked recursively and symbolic links are followed.
/// Results are sorted by relative path so that repeated runs visit files in
/// the same order.
///
/// # Errors
///
/// Returns [`PackagingError::PayloadRootMissing`] when `source_root` or the
/// pattern's payload root does not exist, [`PackagingError::PayloadUnreadable`]
/// when a directory cannot be listed, and [`PackagingError::NonUtf8Path`]
/// for paths that cannot be represented in the package layout.
pub fn collect_payload(source_root: &Utf8Path, pattern: &PayloadPattern) -> Result<Vec<PayloadFile>> {
    if !source_root.is_dir() {
        return Err(PackagingError::PayloadRootMissing {
            path: source_root.to_owned(),
        });
    }
    let payload_root = pattern.payload_root(source_root);
    if !payload_root.exists() {
        return Err(PackagingError::PayloadRootMissing { path: payload_root });
    }
    debug!("collecting payload under {payload_root} matching {pattern}");

    let mut files = Vec::new();
    for entry in WalkDir::new(&payload_root).follow_links(true) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let source_path = Utf8PathBuf::try_from(entry.path().to_path_buf()).map_err(|e| {
            PackagingError::NonUtf8Path {
                path: e.into_path_buf(),
            }
        })?;
        let relative_path = relative_to(&source_path, source_root)?;
        if !pattern.matches(relative_path.as_str()) {
            trace!("skipping {relative_path}: outside payload pattern");
            continue;
        }

        files.push(PayloadFile {
            relative_path,
            source_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!("collected {} payload file(s)", files.len());
    Ok(files)
}

/// Express `path` relative to `root` with `/` separators on every platform.
fn relative_to(path: &Utf8Path, root: &Utf8Path) -> Result<Utf8PathBuf> {
    let stripped = path.strip_prefix(root).map_err(|_| {
        PackagingError::Io(std::io::Error::other(format!(
            "{path} is not inside source root {root}"
        )))
    })?;
    let joined = stripped
        .components()
        .map(|component| component.as_str())
        .collect::<Vec<_>>()
        .join("/");
    Ok(Utf8PathBuf::from(joined))
}

fn walk_error(err: walkdir::Error) -> PackagingError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    PackagingError::PayloadUnreadable { path, source }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
