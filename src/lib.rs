//! Packaging descriptor for the Godot JSON editor add-on.
//!
//! The add-on lives under `addons/json_editor/` in the source tree and is
//! shipped exactly as written: [`GodotJsonEditor`] declares its identity and
//! payload, and the generic machinery in `addon_packager` copies the files.

use addon_packager::packaging_error::Result;
use addon_packager::{PackageDescriptor, Recipe};

/// Package identifier.
pub const NAME: &str = "godot-json-editor";

/// Package version.
pub const VERSION: &str = "1.2.0";

/// Upstream repository of the add-on.
pub const SOURCE_URL: &str = "https://github.com/hnOsmium0001/godot-json-editor";

/// Files exported into the package, relative to the source root.
pub const PAYLOAD_ROOT: &str = "addons/json_editor/*";

/// Recipe for the Godot JSON editor add-on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GodotJsonEditor;

impl Recipe for GodotJsonEditor {
    fn describe(&self) -> PackageDescriptor {
        PackageDescriptor::new(NAME, VERSION, SOURCE_URL, PAYLOAD_ROOT)
    }

    fn build(&self) -> Result<()> {
        // The add-on is GDScript only; the editor interprets it at load time,
        // so there is nothing to compile.
        Ok(())
    }
}
