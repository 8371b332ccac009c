//! Shared helpers for recipe tests.
//!
//! A checkout mirrors the upstream repository layout: the add-on under
//! `addons/json_editor/` plus project files that must never be shipped.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

/// Files inside the add-on directory, relative to the checkout root.
pub const ADDON_FILES: &[(&str, &str)] = &[
    (
        "addons/json_editor/plugin.cfg",
        "[plugin]\nname=\"JSON Editor\"\nscript=\"plugin.gd\"\n",
    ),
    (
        "addons/json_editor/plugin.gd",
        "tool\nextends EditorPlugin\n",
    ),
    (
        "addons/json_editor/editor/json_tree.gd",
        "tool\nextends Tree\n",
    ),
    (
        "addons/json_editor/editor/json_tree.tscn",
        "[gd_scene format=2]\n",
    ),
];

/// Files outside the add-on directory.
pub const PROJECT_FILES: &[(&str, &str)] = &[
    ("conanfile.py", "from conans import ConanFile\n"),
    ("project.godot", "config_version=4\n"),
    ("README.md", "# godot-json-editor\n"),
];

/// A temporary checkout with a UTF-8 root.
pub struct Checkout {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Checkout {
    /// Create an empty checkout.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp path is UTF-8");
        Self { _dir: dir, root }
    }

    /// Create a checkout holding only project files.
    pub fn without_addon() -> Self {
        let checkout = Self::empty();
        checkout.write_all(PROJECT_FILES);
        checkout
    }

    /// Create a checkout holding the add-on and project files.
    pub fn with_addon() -> Self {
        let checkout = Self::without_addon();
        checkout.write_all(ADDON_FILES);
        checkout
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn write_all(&self, files: &[(&str, &str)]) {
        for (relative, contents) in files {
            let path = self.root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create parent directory");
            }
            fs::write(&path, contents).expect("write checkout file");
        }
    }
}

/// Map every file below `root` to its bytes, keyed by `/`-separated relative
/// path.
pub fn snapshot(root: &Utf8Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect(root, "", &mut files);
    files
}

fn collect(dir: &Utf8Path, prefix: &str, files: &mut BTreeMap<String, Vec<u8>>) {
    for entry in dir.read_dir_utf8().expect("read directory") {
        let entry = entry.expect("directory entry");
        let relative = format!("{prefix}{}", entry.file_name());
        if entry.file_type().expect("file type").is_dir() {
            collect(entry.path(), &format!("{relative}/"), files);
        } else {
            files.insert(relative, fs::read(entry.path()).expect("read file"));
        }
    }
}
