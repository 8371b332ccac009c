//! Package materialisation.
//!
//! [`Packager`] copies the payload selected by a descriptor into a
//! destination directory, keeping relative paths and bytes unchanged. Files
//! are first copied into a hidden staging directory beside the destination;
//! only once every file is in place is the previous destination removed and
//! the staging directory renamed over it. A failed run therefore never leaves
//! a half-populated destination behind.

use crate::descriptor::PackageDescriptor;
use crate::packaging_error::{PackagingError, Result};
use crate::payload::{PayloadFile, collect_payload};
use crate::sha256_digest::{DigestStream, Sha256Digest};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, trace};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

const COPY_BUFFER_SIZE: usize = 8192;

/// Summary of a successful packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Package identifier.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Directory the package was written to.
    pub destination: Utf8PathBuf,
    /// Every file written, sorted by relative path.
    pub files: Vec<PackagedFile>,
}

impl PackageReport {
    /// Number of files written.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total payload size in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// One file written into the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagedFile {
    /// Path inside the package, `/`-separated.
    pub relative_path: Utf8PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// SHA-256 of the packaged bytes.
    pub sha256: Sha256Digest,
}

/// Copies payload files from a source tree into package directories.
#[derive(Debug, Clone)]
pub struct Packager {
    source_root: Utf8PathBuf,
}

impl Packager {
    /// Create a packager reading payload files relative to `source_root`.
    #[must_use]
    pub fn new(source_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// Package the payload selected by `descriptor` into `destination`.
    ///
    /// Any existing file or directory at `destination` is replaced.
    ///
    /// # Errors
    ///
    /// Returns a configuration-category error if the descriptor is invalid
    /// or `destination` overlaps the payload (inside it, or enclosing any
    /// payload file or the payload root), and an I/O-category
    /// error if the payload cannot be read or the destination cannot be
    /// written. The source tree is never modified, and `destination` is left
    /// as it was unless the final replacement step itself fails.
    pub fn package(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Utf8Path,
    ) -> Result<PackageReport> {
        let validated = descriptor.validate()?;
        info!(
            "packaging {} {} into {destination}",
            validated.name(),
            validated.version()
        );

        let files = collect_payload(&self.source_root, validated.payload())?;
        let payload_root = validated.payload().payload_root(&self.source_root);
        ensure_disjoint(destination, &payload_root, &files)?;

        let parent = parent_dir(destination);
        fs::create_dir_all(parent).map_err(|source| PackagingError::DestinationUnwritable {
            path: parent.to_owned(),
            source,
        })?;

        let prefix = format!(".{}-staging-", validated.name());
        let staging = staging_builder(&prefix).tempdir_in(parent).map_err(|source| {
            PackagingError::DestinationUnwritable {
                path: parent.to_owned(),
                source,
            }
        })?;
        debug!("staging package in {}", staging.path().display());

        let packaged = files
            .iter()
            .map(|file| copy_payload_file(file, staging.path()))
            .collect::<Result<Vec<_>>>()?;

        let staged = staging.keep();
        if let Err(err) = replace_destination(&staged, destination) {
            if let Err(cleanup) = fs::remove_dir_all(&staged) {
                debug!("could not remove staging directory {}: {cleanup}", staged.display());
            }
            return Err(err);
        }

        let report = PackageReport {
            name: validated.name().as_str().to_owned(),
            version: validated.version().as_str().to_owned(),
            destination: destination.to_owned(),
            files: packaged,
        };
        info!(
            "packaged {} file(s), {} byte(s) into {destination}",
            report.file_count(),
            report.total_bytes()
        );
        Ok(report)
    }
}

fn staging_builder(prefix: &str) -> tempfile::Builder<'_, 'static> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o755));
    }
    builder
}

fn parent_dir(destination: &Utf8Path) -> &Utf8Path {
    match destination.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Reject destinations that overlap the payload they receive.
///
/// A destination inside the payload root would be packaged by later runs. A
/// destination enclosing the payload root, or any file the walk reached
/// through a symbolic link, would be deleted when the staged copy replaces
/// it. Paths are compared after resolving symbolic links.
fn ensure_disjoint(
    destination: &Utf8Path,
    payload_root: &Utf8Path,
    files: &[PayloadFile],
) -> Result<()> {
    let destination_real = resolve_existing(destination)?;
    let payload_real = resolve_existing(payload_root)?;

    if destination_real.starts_with(&payload_real) {
        return Err(PackagingError::DestinationInsidePayload {
            destination: destination.to_owned(),
            payload_root: payload_root.to_owned(),
        });
    }
    if payload_real.starts_with(&destination_real) {
        return Err(PackagingError::DestinationContainsPayload {
            destination: destination.to_owned(),
            payload: payload_root.to_owned(),
        });
    }
    for file in files {
        let source_real = resolve_existing(&file.source_path)?;
        if source_real.starts_with(&destination_real) {
            return Err(PackagingError::DestinationContainsPayload {
                destination: destination.to_owned(),
                payload: file.source_path.clone(),
            });
        }
    }
    Ok(())
}

/// Make `path` absolute and resolve symbolic links in its longest existing
/// ancestor. Components that do not exist yet are appended unchanged.
fn resolve_existing(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let absolute = absolute_utf8(path)?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        match existing.canonicalize_utf8() {
            Ok(real) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(real, |resolved, name| resolved.join(name)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Ok(absolute.clone());
                };
                missing.push(name);
                existing = parent;
            }
            Err(e) => return Err(PackagingError::Io(e)),
        }
    }
}

fn absolute_utf8(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let absolute = std::path::absolute(path)?;
    Utf8PathBuf::try_from(absolute).map_err(|e| PackagingError::NonUtf8Path {
        path: e.into_path_buf(),
    })
}

fn copy_payload_file(file: &PayloadFile, staging_root: &Path) -> Result<PackagedFile> {
    let target = staging_root.join(&file.relative_path);
    let unreadable = |source: io::Error| PackagingError::PayloadUnreadable {
        path: file.source_path.clone().into_std_path_buf(),
        source,
    };
    let unwritable = |source: io::Error| PackagingError::DestinationUnwritable {
        path: file.relative_path.clone(),
        source,
    };

    let mut reader = fs::File::open(&file.source_path).map_err(unreadable)?;
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(unwritable)?;
    }
    let mut writer = fs::File::create(&target).map_err(unwritable)?;

    let mut stream = DigestStream::default();
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(unreadable(e)),
        };
        let chunk = buffer.get(..bytes_read).unwrap_or_default();
        stream.update(chunk);
        writer.write_all(chunk).map_err(unwritable)?;
    }
    writer.flush().map_err(unwritable)?;

    let permissions = reader.metadata().map_err(unreadable)?.permissions();
    fs::set_permissions(&target, permissions).map_err(unwritable)?;

    let (sha256, size) = stream.finish();
    trace!("copied {} ({size} bytes)", file.relative_path);
    Ok(PackagedFile {
        relative_path: file.relative_path.clone(),
        size,
        sha256,
    })
}

/// Swap the fully populated staging directory into place.
fn replace_destination(staging: &Path, destination: &Utf8Path) -> Result<()> {
    let unwritable = |source: io::Error| PackagingError::DestinationUnwritable {
        path: destination.to_owned(),
        source,
    };

    match fs::symlink_metadata(destination) {
        Ok(meta) if meta.is_dir() => {
            debug!("replacing existing package directory {destination}");
            fs::remove_dir_all(destination).map_err(unwritable)?;
        }
        Ok(_) => {
            debug!("replacing existing file {destination}");
            fs::remove_file(destination).map_err(unwritable)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(unwritable(e)),
    }

    fs::rename(staging, destination).map_err(unwritable)
}

#[cfg(test)]
#[path = "packager_tests.rs"]
mod tests;
