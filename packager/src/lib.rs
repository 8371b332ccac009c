//! Add-on packaging library.
//!
//! This crate turns a static package descriptor into a self-contained
//! package directory: it selects the payload files named by the descriptor's
//! glob and copies them verbatim, keeping their relative paths. Add-ons
//! written in the host editor's scripting language need no build step, so
//! the payload is treated as opaque data throughout.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`descriptor`] - Package descriptor and TOML loading
//! - [`error`] - Descriptor validation errors
//! - [`output`] - Human-readable and JSON output formatting
//! - [`package_name`] - Validated package identifier
//! - [`package_version`] - Validated semantic version
//! - [`packager`] - Staged, replace-on-success package materialisation
//! - [`packaging_error`] - Packaging run errors and their categories
//! - [`payload`] - Payload glob matching and enumeration
//! - [`recipe`] - The describe/build/package interface
//! - [`run`] - Command dispatch
//! - [`sha256_digest`] - Digests recorded in package reports

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod output;
pub mod package_name;
pub mod package_version;
pub mod packager;
pub mod packaging_error;
pub mod payload;
pub mod recipe;
pub mod run;
pub mod sha256_digest;

pub use descriptor::{PackageDescriptor, ValidatedDescriptor};
pub use packager::{PackageReport, PackagedFile, Packager};
pub use packaging_error::{ErrorCategory, PackagingError};
pub use recipe::{DescriptorRecipe, Recipe};
