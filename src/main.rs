//! `godot-json-editor-package` entrypoint.
//!
//! Invoked by build and distribution tooling to describe the add-on or to
//! copy its payload into a package directory.

use addon_packager::PackagingError;
use addon_packager::cli::Cli;
use addon_packager::run::run;
use clap::{CommandFactory, FromArgMatches};
use godot_json_editor::GodotJsonEditor;
use std::io::Write;

const BIN_NAME: &str = "godot-json-editor-package";

fn main() {
    let command = Cli::command()
        .name(BIN_NAME)
        .bin_name(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"));
    let cli = Cli::from_arg_matches(&command.get_matches()).unwrap_or_else(|err| err.exit());

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&GodotJsonEditor, &cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(
    result: Result<(), PackagingError>,
    stderr: &mut dyn Write,
) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, error_report(&err));
            1
        }
    }
}

/// Render the error and its chain of causes.
fn error_report(err: &PackagingError) -> String {
    let mut report = format!("error: {err}");
    let mut cause = std::error::Error::source(err);
    while let Some(inner) = cause {
        report.push_str("\n  caused by: ");
        report.push_str(&inner.to_string());
        cause = inner.source();
    }
    report
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
