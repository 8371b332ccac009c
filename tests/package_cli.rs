//! End-to-end tests for the `godot-json-editor-package` binary.

mod support;

use rstest::rstest;
use std::process::{Command, Output};
use support::{ADDON_FILES, Checkout, PROJECT_FILES, snapshot};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_godot-json-editor-package"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is UTF-8")
}

#[test]
fn describe_prints_the_compiled_in_identity() {
    let output = run_binary(&["describe"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("godot-json-editor 1.2.0"));
    assert!(stdout.contains("https://github.com/hnOsmium0001/godot-json-editor"));
    assert!(stdout.contains("addons/json_editor/*"));
}

#[test]
fn describe_json_is_machine_readable() {
    let output = run_binary(&["describe", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("describe --json emits JSON");
    assert_eq!(value["name"], "godot-json-editor");
    assert_eq!(value["version"], "1.2.0");
    assert_eq!(value["payload_root"], "addons/json_editor/*");
}

#[test]
fn build_reports_nothing_to_compile() {
    let output = run_binary(&["build"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Build step complete for godot-json-editor 1.2.0"));
}

#[test]
fn package_copies_the_addon() {
    let checkout = Checkout::with_addon();
    let destination = checkout.root().join("dist/package");

    let output = run_binary(&[
        "package",
        destination.as_str(),
        "--source-root",
        checkout.root().as_str(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains(&format!("{} file(s)", ADDON_FILES.len())));
    let contents = snapshot(&destination);
    assert_eq!(contents.len(), ADDON_FILES.len());
    assert!(contents.contains_key("addons/json_editor/plugin.gd"));
    for (path, _) in PROJECT_FILES {
        assert!(!contents.contains_key(*path), "{path} leaked into package");
    }
}

#[test]
fn package_json_lists_digests() {
    let checkout = Checkout::with_addon();
    let destination = checkout.root().join("out");

    let output = run_binary(&[
        "package",
        destination.as_str(),
        "--source-root",
        checkout.root().as_str(),
        "--json",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let value: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("package --json emits JSON");
    let files = value["files"].as_array().expect("files array");
    assert_eq!(files.len(), ADDON_FILES.len());
    assert!(files.iter().all(|file| file["sha256"].as_str().map(str::len) == Some(64)));
}

#[rstest]
#[case::missing_addon(false)]
#[case::unreadable_descriptor(true)]
fn failures_exit_with_status_one(#[case] use_descriptor_file: bool) {
    let checkout = Checkout::without_addon();
    let destination = checkout.root().join("dist/package");
    let missing_descriptor = checkout.root().join("missing.toml");

    let mut args = Vec::new();
    if use_descriptor_file {
        args.extend(["--descriptor", missing_descriptor.as_str()]);
    }
    args.extend([
        "package",
        destination.as_str(),
        "--source-root",
        checkout.root().as_str(),
    ]);
    let output = run_binary(&args);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).starts_with("error: "));
    assert!(!destination.exists());
}

#[test]
fn descriptor_file_overrides_the_compiled_in_recipe() {
    let checkout = Checkout::with_addon();
    let descriptor = checkout.root().join("plugin.toml");
    std::fs::write(
        &descriptor,
        concat!(
            "name = \"json-editor-scenes\"\n",
            "version = \"1.2.0-rc.1\"\n",
            "source_url = \"https://github.com/hnOsmium0001/godot-json-editor\"\n",
            "payload_root = \"addons/json_editor/editor/*\"\n",
        ),
    )
    .expect("write descriptor");
    let destination = checkout.root().join("dist/scenes");

    let output = run_binary(&[
        "--descriptor",
        descriptor.as_str(),
        "package",
        destination.as_str(),
        "--source-root",
        checkout.root().as_str(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("Packaged json-editor-scenes 1.2.0-rc.1"));
    let contents = snapshot(&destination);
    assert_eq!(
        contents.keys().collect::<Vec<_>>(),
        vec![
            "addons/json_editor/editor/json_tree.gd",
            "addons/json_editor/editor/json_tree.tscn",
        ]
    );
}

#[rstest]
#[case::working_directory(".")]
#[case::addons_dir("addons")]
fn package_refuses_to_replace_the_checkout(#[case] destination: &str) {
    let checkout = Checkout::with_addon();
    let before = snapshot(checkout.root());

    let output = Command::new(env!("CARGO_BIN_EXE_godot-json-editor-package"))
        .args(["package", destination])
        .current_dir(checkout.root())
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("contains payload"));
    assert_eq!(snapshot(checkout.root()), before);
}
