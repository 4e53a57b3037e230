#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::{CommandFactory, Parser};

use super::*;

#[test]
fn root_help_lists_all_subcommands() {
    let help = format!("{}", Cli::command().render_help());
    for name in ["loops", "node", "inspect"] {
        assert!(help.contains(name), "root help should mention '{name}'");
    }
}

#[test]
fn root_help_lists_global_flags() {
    let help = format!("{}", Cli::command().render_help());
    for flag in [
        "--format",
        "--quiet",
        "--verbose",
        "--max-file-size",
        "--no-color",
        "--help",
        "--version",
    ] {
        assert!(help.contains(flag), "root help should mention '{flag}'");
    }
}

#[test]
fn node_help_mentions_positionals() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("node")
        .expect("node subcommand should exist");
    let help = format!("{}", sub.render_help());
    assert!(help.contains("FILE"), "{help}");
    assert!(help.contains("NODE_ID"), "{help}");
}

#[test]
fn dash_parses_as_stdin() {
    let cli = Cli::try_parse_from(["loopfind", "loops", "-"]).expect("should parse loops -");
    match cli.command {
        Command::Loops {
            file: PathOrStdin::Stdin,
        } => {}
        _ => panic!("expected loops from stdin"),
    }
}

#[test]
fn real_path_parses_as_path() {
    let cli = Cli::try_parse_from(["loopfind", "node", "board.json", "births"])
        .expect("should parse node <file> <id>");
    match cli.command {
        Command::Node {
            file: PathOrStdin::Path(p),
            node_id,
        } => {
            assert_eq!(p.to_string_lossy(), "board.json");
            assert_eq!(node_id, "births");
        }
        _ => panic!("expected node with a path"),
    }
}

#[test]
fn node_requires_an_id() {
    assert!(Cli::try_parse_from(["loopfind", "node", "board.json"]).is_err());
}

#[test]
fn quiet_and_verbose_conflict() {
    let result = Cli::try_parse_from(["loopfind", "--quiet", "--verbose", "loops", "-"]);
    assert!(result.is_err(), "--quiet and --verbose should conflict");
}

#[test]
fn max_file_size_default_is_16_mib() {
    let cli = Cli::try_parse_from(["loopfind", "loops", "-"]).expect("should parse");
    assert_eq!(cli.max_file_size, 16 * 1024 * 1024);
}

#[test]
fn max_file_size_flag_overrides_default() {
    let cli = Cli::try_parse_from(["loopfind", "loops", "--max-file-size", "1024", "-"])
        .expect("global flag after subcommand");
    assert_eq!(cli.max_file_size, 1024);
}

#[test]
fn format_defaults_to_human() {
    let cli = Cli::try_parse_from(["loopfind", "inspect", "-"]).expect("should parse");
    assert!(matches!(cli.format, OutputFormat::Human));

    let cli = Cli::try_parse_from(["loopfind", "-f", "json", "inspect", "-"])
        .expect("should parse -f json");
    assert!(matches!(cli.format, OutputFormat::Json));
}

#[test]
fn no_color_flag_parses_without_value() {
    let cli = Cli::try_parse_from(["loopfind", "loops", "--no-color", "-"]).expect("should parse");
    assert!(cli.no_color);
}
