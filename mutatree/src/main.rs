//! # mutatree
//!
//! A CLI for preparing mutation testing runs over a source tree.
//!
//! ## Overview
//!
//! mutatree is built on top of mutatreelib. It lists the source files a
//! mutation run would cover and writes generated mutants into the mirrored
//! output tree, so shell-driven mutation tools can share one on-disk layout.
//!
//! ## Usage
//!
//! ```bash
//! # List all Java files under src/main/java
//! mutatree list src/main/java --build target
//!
//! # Only the com.example.core package, as JSON
//! mutatree list src/main/java --build target -w com.example.core --output json
//!
//! # Everything except generated code and one file
//! mutatree list src/main/java --build target -x com.example.gen -x util/Legacy.java
//!
//! # Store a mutant of Foo.java read from stdin, with a density report
//! generate-mutant Foo.java | mutatree write src/main/java --build target \
//!     src/main/java/com/example/Foo.java --density density.csv
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use mutatreelib::output::read_density;
use mutatreelib::{
    DiscoverOptions, FilterMode, FilterSpec, OutputWriter, SourceTree, DEFAULT_PATTERN,
    OUTPUT_DIR_NAME,
};
use serde::Serialize;
use tracing::Level;

/// JSON report for the list command
#[derive(Debug, Serialize)]
struct ListReport {
    source_root: PathBuf,
    output_root: PathBuf,
    files: Vec<String>,
}

/// JSON report for the write command
#[derive(Debug, Serialize)]
struct WriteReport {
    original: PathBuf,
    entry: PathBuf,
    variant: PathBuf,
}

/// Convert a path to a relative path from the base directory
fn make_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}

/// Arguments shared by every subcommand
fn tree_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("source")
            .required(true)
            .help("Source root to mirror"),
    )
    .arg(
        Arg::new("build")
            .short('b')
            .long("build")
            .default_value(".")
            .help("Build directory; results go to <BUILD>/mutatree-results"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("mutatree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Discover, filter and materialize mutants of a source tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log discovery details and every generated file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .subcommand(
            tree_args(Command::new("list").about("List the source files a run would mutate"))
                .arg(
                    Arg::new("pattern")
                        .short('p')
                        .long("pattern")
                        .default_value(DEFAULT_PATTERN)
                        .help("Glob matched against file names"),
                )
                .arg(
                    Arg::new("whitelist")
                        .short('w')
                        .long("whitelist")
                        .action(ArgAction::Append)
                        .conflicts_with("blacklist")
                        .help("Keep only this package or path (can be specified multiple times)"),
                )
                .arg(
                    Arg::new("blacklist")
                        .short('x')
                        .long("blacklist")
                        .action(ArgAction::Append)
                        .help("Drop this package or path (can be specified multiple times)"),
                ),
        )
        .subcommand(
            tree_args(Command::new("write").about("Store one mutant of a source file"))
                .arg(
                    Arg::new("original")
                        .required(true)
                        .help("Original source file the mutant was generated from"),
                )
                .arg(
                    Arg::new("content")
                        .help("File holding the mutant (defaults to stdin)"),
                )
                .arg(
                    Arg::new("density")
                        .short('d')
                        .long("density")
                        .help("Per-line mutant counts as 'line,count' CSV"),
                ),
        )
}

/// Build the filter from --whitelist/--blacklist
fn build_filter(matches: &ArgMatches) -> Option<FilterSpec> {
    let (mode, id) = if matches.contains_id("whitelist") {
        (FilterMode::Whitelist, "whitelist")
    } else {
        (FilterMode::Blacklist, "blacklist")
    };

    matches
        .get_many::<String>(id)
        .map(|tokens| FilterSpec::new(mode, tokens.cloned()))
}

fn is_json(matches: &ArgMatches) -> bool {
    matches
        .get_one::<String>("output")
        .is_some_and(|mode| mode == "json")
}

fn source_and_build(matches: &ArgMatches) -> (&str, &str) {
    let source = matches
        .get_one::<String>("source")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let build = matches
        .get_one::<String>("build")
        .map(|s| s.as_str())
        .unwrap_or(".");
    (source, build)
}

/// Handler for the list command
fn list_handler(matches: &ArgMatches) -> anyhow::Result<()> {
    let (source, build) = source_and_build(matches);
    let pattern = matches
        .get_one::<String>("pattern")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_PATTERN);

    let mut options = DiscoverOptions::new().pattern(pattern);
    if let Some(filter) = build_filter(matches) {
        options = options.filter(filter);
    }

    let tree = SourceTree::discover(source, build, &options)?;
    let files: Vec<String> = tree
        .files()
        .iter()
        .map(|f| make_relative(f, tree.source_root()))
        .collect();

    if is_json(matches) {
        let report = ListReport {
            source_root: tree.source_root().to_path_buf(),
            output_root: tree.output_root().to_path_buf(),
            files,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let heading = Style::new().bold();
    eprintln!(
        "{}",
        heading.apply_to(format!("{} source files", files.len()))
    );
    for file in files {
        println!("{file}");
    }

    Ok(())
}

/// Read the mutant text from a file or stdin, replacing invalid UTF-8
fn read_content(path: Option<&String>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read '{path}'"))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read mutant from stdin")?;
            buf
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Handler for the write command
fn write_handler(matches: &ArgMatches, verbose: bool) -> anyhow::Result<()> {
    let (source, build) = source_and_build(matches);
    // Made absolute without resolving symlinks, so that a file reached through
    // a linked directory keeps the path `list` reports for it
    let source = std::path::absolute(source)
        .with_context(|| format!("failed to resolve source root '{source}'"))?;
    if !source.is_dir() {
        anyhow::bail!("source root '{}' does not exist", source.display());
    }
    let original = matches
        .get_one::<String>("original")
        .context("missing original file")?;
    let original = std::path::absolute(original)
        .with_context(|| format!("failed to resolve original file '{original}'"))?;

    let content = read_content(matches.get_one::<String>("content"))?;
    let density = matches
        .get_one::<String>("density")
        .map(|path| read_density(Path::new(path)))
        .transpose()?;

    let writer = OutputWriter::new(&source, Path::new(build).join(OUTPUT_DIR_NAME)).verbose(verbose);
    let variant = writer.write(&original, &content, density.as_ref())?;

    if is_json(matches) {
        let report = WriteReport {
            entry: writer.entry_for(&original)?.relative_dir().to_path_buf(),
            original,
            variant,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", variant.display());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    let result = match matches.subcommand() {
        Some(("list", sub)) => list_handler(sub),
        Some(("write", sub)) => write_handler(sub, verbose),
        _ => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_build_filter() {
        let matches = build_command()
            .try_get_matches_from(["mutatree", "list", "src", "-w", "a.b", "-w", "c/D.java"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        assert_eq!(
            build_filter(sub),
            Some(FilterSpec::whitelist(["a.b", "c/D.java"]))
        );
    }

    #[test]
    fn test_build_filter_none() {
        let matches = build_command()
            .try_get_matches_from(["mutatree", "list", "src"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        assert_eq!(build_filter(sub), None);
    }

    #[test]
    fn test_whitelist_conflicts_with_blacklist() {
        let result = build_command().try_get_matches_from([
            "mutatree", "list", "src", "-w", "a", "-x", "b",
        ]);

        assert!(result.is_err());
    }
}
