//! Shared helpers for packaging behaviour tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Create a temporary directory and return it with its UTF-8 path.
pub fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp path is UTF-8");
    (dir, path)
}

/// Write `count` files with distinct contents under `dir`, half of them in
/// a nested subdirectory.
pub fn populate_addon(dir: &Utf8Path, count: usize) {
    fs::create_dir_all(dir.join("scenes")).expect("mkdir addon");
    for index in 0..count {
        let path = if index % 2 == 0 {
            dir.join(format!("script_{index}.gd"))
        } else {
            dir.join("scenes").join(format!("scene_{index}.tscn"))
        };
        let mut contents = format!("# file {index}\n").into_bytes();
        contents.extend((0..=255u8).cycle().skip(index).take(512));
        fs::write(path, contents).expect("write payload file");
    }
}

/// Map every file below `root` to its bytes, keyed by `/`-separated relative
/// path.
pub fn snapshot(root: &Utf8Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("walk entry"))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .expect("entry below root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (relative, fs::read(entry.path()).expect("read entry"))
        })
        .collect()
}
