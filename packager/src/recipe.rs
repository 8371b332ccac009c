//! The packaging interface shared by every add-on recipe.
//!
//! A recipe supplies its static [`PackageDescriptor`]; the build and package
//! phases have defaults so that script-only add-ons and add-ons that need a
//! compilation step are driven the same way.

use crate::descriptor::PackageDescriptor;
use crate::packager::{PackageReport, Packager};
use crate::packaging_error::Result;
use camino::Utf8Path;

/// A packageable add-on.
pub trait Recipe {
    /// Return the static identity, version, source and payload metadata.
    fn describe(&self) -> PackageDescriptor;

    /// Prepare the payload for packaging.
    ///
    /// The default does nothing: payloads interpreted by the host at runtime
    /// have nothing to compile. Recipes with a real build phase override it.
    ///
    /// # Errors
    ///
    /// The default never fails; overrides report their own build failures.
    fn build(&self) -> Result<()> {
        Ok(())
    }

    /// Copy the payload found under `source_root` into `destination`.
    ///
    /// # Errors
    ///
    /// See [`Packager::package`].
    fn package(&self, source_root: &Utf8Path, destination: &Utf8Path) -> Result<PackageReport> {
        Packager::new(source_root).package(&self.describe(), destination)
    }
}

/// A recipe backed by a descriptor loaded at runtime, for example from a
/// TOML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorRecipe {
    descriptor: PackageDescriptor,
}

impl DescriptorRecipe {
    /// Wrap a descriptor.
    #[must_use]
    pub const fn new(descriptor: PackageDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Recipe for DescriptorRecipe {
    fn describe(&self) -> PackageDescriptor {
        self.descriptor.clone()
    }
}
