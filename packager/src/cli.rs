//! CLI argument definitions for add-on packaging binaries.
//!
//! The subcommands map one-to-one onto the [`crate::recipe::Recipe`]
//! operations. The binary name is supplied by the recipe crate that embeds
//! this parser, so the same definitions serve every add-on.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

/// Package an editor add-on from its compiled-in descriptor.
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Show the package identity:\n",
    "    $ <binary> describe\n\n",
    "  Copy the payload into a package directory:\n",
    "    $ <binary> package dist/package\n\n",
    "  Package a different add-on from a TOML descriptor:\n",
    "    $ <binary> --descriptor other-addon.toml package dist/other",
))]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,

    /// Read the descriptor from a TOML file instead of the compiled-in one.
    #[arg(long, global = true, value_name = "FILE")]
    pub descriptor: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        global = true,
        action = ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the package name, version, source URL and payload rule.
    Describe(DescribeArgs),

    /// Run the build phase (a no-op for script-only add-ons).
    Build,

    /// Copy the payload into a fresh package directory.
    Package(PackageArgs),
}

/// Arguments for the describe command.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeArgs {
    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the package command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PackageArgs {
    /// Directory to write the package to; replaced if it exists.
    #[arg(value_name = "DESTINATION")]
    pub destination: Utf8PathBuf,

    /// Directory the payload pattern is resolved against [default: current directory].
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<Utf8PathBuf>,

    /// Print the package report (file list and digests) as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Map the verbosity flags onto a log level filter.
    ///
    /// Warnings are shown by default; each `-v` adds a level and `-q`
    /// restricts output to errors.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
