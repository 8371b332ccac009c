//! Command dispatch.
//!
//! [`run`] executes a parsed [`Cli`] against a recipe and writes results to
//! the supplied writer, keeping the binary entrypoint free of logic and the
//! commands testable without touching the process's stdout.

use crate::cli::{Cli, Command, DescribeArgs, PackageArgs};
use crate::descriptor::PackageDescriptor;
use crate::output::{
    format_build_message, format_descriptor_human, format_descriptor_json, format_package_json,
    format_package_summary,
};
use crate::packaging_error::{PackagingError, Result};
use crate::recipe::{DescriptorRecipe, Recipe};
use camino::Utf8PathBuf;
use log::{debug, info};
use std::io::Write;

/// Run the selected command.
///
/// When `--descriptor` is given, the descriptor file replaces `recipe` for
/// this invocation.
///
/// # Errors
///
/// Returns any [`PackagingError`] raised by the command, or
/// [`PackagingError::WriteFailed`] if output cannot be written.
pub fn run<R: Recipe>(recipe: &R, cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    match &cli.descriptor {
        Some(path) => {
            info!("using descriptor file {path}");
            let loaded = DescriptorRecipe::new(PackageDescriptor::load(path)?);
            dispatch(&loaded, &cli.command, stdout)
        }
        None => dispatch(recipe, &cli.command, stdout),
    }
}

fn dispatch<R: Recipe>(recipe: &R, command: &Command, stdout: &mut dyn Write) -> Result<()> {
    match command {
        Command::Describe(args) => run_describe(recipe, args, stdout),
        Command::Build => run_build(recipe, stdout),
        Command::Package(args) => run_package(recipe, args, stdout),
    }
}

fn run_describe<R: Recipe>(recipe: &R, args: &DescribeArgs, stdout: &mut dyn Write) -> Result<()> {
    let descriptor = recipe.describe();
    let output = if args.json {
        format_descriptor_json(&descriptor)
    } else {
        format_descriptor_human(&descriptor)
    };
    write_line(stdout, &output)
}

fn run_build<R: Recipe>(recipe: &R, stdout: &mut dyn Write) -> Result<()> {
    recipe.build()?;
    write_line(stdout, &format_build_message(&recipe.describe()))
}

fn run_package<R: Recipe>(recipe: &R, args: &PackageArgs, stdout: &mut dyn Write) -> Result<()> {
    let source_root = match &args.source_root {
        Some(root) => root.clone(),
        None => current_dir()?,
    };
    debug!("resolving payload against {source_root}");

    let report = recipe.package(&source_root, &args.destination)?;
    let output = if args.json {
        format_package_json(&report)
    } else {
        format_package_summary(&report)
    };
    write_line(stdout, &output)
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| PackagingError::NonUtf8Path {
        path: e.into_path_buf(),
    })
}

fn write_line(stdout: &mut dyn Write, output: &str) -> Result<()> {
    writeln!(stdout, "{output}").map_err(|source| PackagingError::WriteFailed { source })
}
