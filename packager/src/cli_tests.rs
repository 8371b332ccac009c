//! Tests for CLI parsing and verbosity mapping.

use super::*;
use rstest::rstest;

const BIN: &str = "addon-package";

#[test]
fn cli_parses_describe() {
    let cli = Cli::parse_from([BIN, "describe"]);
    assert_eq!(cli.command, Command::Describe(DescribeArgs::default()));
    assert!(cli.descriptor.is_none());
}

#[test]
fn cli_parses_describe_json() {
    let cli = Cli::parse_from([BIN, "describe", "--json"]);
    assert_eq!(cli.command, Command::Describe(DescribeArgs { json: true }));
}

#[test]
fn cli_parses_build() {
    let cli = Cli::parse_from([BIN, "build"]);
    assert_eq!(cli.command, Command::Build);
}

#[test]
fn cli_parses_package_destination() {
    let cli = Cli::parse_from([BIN, "package", "dist/package"]);
    match cli.command {
        Command::Package(args) => {
            assert_eq!(args.destination, Utf8PathBuf::from("dist/package"));
            assert!(args.source_root.is_none());
            assert!(!args.json);
        }
        other => panic!("expected Package command, got {other:?}"),
    }
}

#[test]
fn cli_parses_package_source_root() {
    let cli = Cli::parse_from([BIN, "package", "out", "--source-root", "/src/addon"]);
    match cli.command {
        Command::Package(args) => {
            assert_eq!(args.source_root, Some(Utf8PathBuf::from("/src/addon")));
        }
        other => panic!("expected Package command, got {other:?}"),
    }
}

#[test]
fn cli_rejects_package_without_destination() {
    Cli::try_parse_from([BIN, "package"])
        .expect_err("expected clap to reject a missing destination");
}

#[test]
fn cli_requires_a_subcommand() {
    Cli::try_parse_from([BIN]).expect_err("expected clap to require a subcommand");
}

#[test]
fn descriptor_flag_is_global() {
    let cli = Cli::parse_from([BIN, "describe", "--descriptor", "addon.toml"]);
    assert_eq!(cli.descriptor, Some(Utf8PathBuf::from("addon.toml")));
}

#[test]
fn cli_rejects_quiet_with_verbose() {
    Cli::try_parse_from([BIN, "-q", "-v", "build"])
        .expect_err("expected clap to reject conflicting verbosity flags");
}

#[rstest]
#[case::default(&[], LevelFilter::Warn)]
#[case::info(&["-v"], LevelFilter::Info)]
#[case::debug(&["-vv"], LevelFilter::Debug)]
#[case::trace(&["-vvvv"], LevelFilter::Trace)]
#[case::quiet(&["-q"], LevelFilter::Error)]
fn verbosity_maps_to_log_level(#[case] flags: &[&str], #[case] expected: LevelFilter) {
    let args: Vec<&str> = std::iter::once(BIN)
        .chain(flags.iter().copied())
        .chain(std::iter::once("build"))
        .collect();
    let cli = Cli::parse_from(args);
    assert_eq!(cli.log_level(), expected);
}
