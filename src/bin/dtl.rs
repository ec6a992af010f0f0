//! Command-line interface for dtl
//!
//! Usage:
//!   dtl parse [`<file>`] [--format `<stage-format>`]  - Print a serialization of the file
//!   dtl format [`<file>`] [--check]                  - Rewrite the file in canonical form
//!   dtl find `<file>` `<description>` [--ongoing|--static]
//!   dtl add `<file>` `<description>`                 - Record an entry at the current time
//!   dtl begin `<file>` `<description>`               - Start an ongoing entry
//!   dtl end `<file>` `<description>` [--index `<n>`]   - Close an ongoing entry
//!   dtl list-formats                               - List available output formats

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dtl::config::{self, DtlConfig};
use dtl::processor::{available_formats, process, ProcessingSpec};
use dtl::{logging, parse_document, Document, TimeValue};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Journal file; relative paths fall back to the journal directory")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

/// The file argument of commands that take no other positional
fn optional_file_arg() -> Arg {
    file_arg()
        .required(false)
        .help("Journal file; defaults to the configured journal")
}

fn description_arg() -> Arg {
    Arg::new("description")
        .help("Entry description, without brackets")
        .required(true)
        .index(2)
}

fn cli() -> Command {
    Command::new("dtl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for keeping and querying dtl time-tracking journals")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level spec (e.g. 'debug', 'dtl=trace')"),
        )
        .subcommand(
            Command::new("parse")
                .about("Print a serialization of a dtl file")
                .arg(optional_file_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'ast-tag', 'ast-json', 'token-simple')")
                        .default_value("ast-tag"),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Rewrite a dtl file in canonical form")
                .arg(optional_file_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Only report whether the file is already canonical"),
                ),
        )
        .subcommand(
            Command::new("find")
                .about("Print entries with the given description")
                .arg(file_arg())
                .arg(description_arg())
                .arg(
                    Arg::new("ongoing")
                        .long("ongoing")
                        .action(ArgAction::SetTrue)
                        .help("Only ongoing entries"),
                )
                .arg(
                    Arg::new("static")
                        .long("static")
                        .action(ArgAction::SetTrue)
                        .help("Only entries that are not ongoing"),
                )
                .group(ArgGroup::new("state").args(["ongoing", "static"])),
        )
        .subcommand(
            Command::new("add")
                .about("Record an entry at the current time")
                .arg(file_arg())
                .arg(description_arg()),
        )
        .subcommand(
            Command::new("begin")
                .about("Start an ongoing entry at the current time")
                .arg(file_arg())
                .arg(description_arg()),
        )
        .subcommand(
            Command::new("end")
                .about("Close an ongoing entry at the current time")
                .arg(file_arg())
                .arg(description_arg())
                .arg(
                    Arg::new("index")
                        .long("index")
                        .value_parser(clap::value_parser!(usize))
                        .help("Which match to close (1-based) when several are ongoing"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn run() -> Result<ExitCode> {
    let matches = cli().get_matches();

    let config = config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("Failed to load configuration")?;
    logging::init_logging(
        matches.get_one::<String>("log-level").map(String::as_str),
        &config.logging.level,
    )
    .context("Failed to initialize logging")?;

    match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(&config, sub),
        Some(("format", sub)) => handle_format_command(&config, sub),
        Some(("find", sub)) => handle_find_command(&config, sub),
        Some(("add", sub)) => handle_add_command(&config, sub, false),
        Some(("begin", sub)) => handle_add_command(&config, sub, true),
        Some(("end", sub)) => handle_end_command(&config, sub),
        Some(("list-formats", _)) => {
            println!("Available formats:\n");
            for format in available_formats() {
                println!("  {}", format);
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => unreachable!(),
    }
}

fn journal_path(config: &DtlConfig, matches: &ArgMatches) -> PathBuf {
    config
        .journal
        .resolve(matches.get_one::<PathBuf>("file").map(PathBuf::as_path))
}

fn description(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("description")
        .map(String::as_str)
        .unwrap_or_default()
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a journal; a missing file is an empty journal
fn load_journal(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Ok(Document::default());
    }
    let source = read_source(path)?;
    let parsed =
        parse_document(&source).with_context(|| format!("Failed to parse {}", path.display()))?;
    for warning in &parsed.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(parsed.document)
}

fn save_journal(path: &Path, doc: &Document) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, doc.format()).with_context(|| format!("Failed to write {}", path.display()))
}

fn handle_parse_command(config: &DtlConfig, matches: &ArgMatches) -> Result<ExitCode> {
    let path = journal_path(config, matches);
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("ast-tag");
    let spec = ProcessingSpec::from_string(format)?;

    let source = read_source(&path)?;
    let output =
        process(&source, &spec).with_context(|| format!("Failed to process {}", path.display()))?;
    println!("{}", output.trim_end_matches('\n'));
    Ok(ExitCode::SUCCESS)
}

fn handle_format_command(config: &DtlConfig, matches: &ArgMatches) -> Result<ExitCode> {
    let path = journal_path(config, matches);
    let source = read_source(&path)?;
    let parsed =
        parse_document(&source).with_context(|| format!("Failed to parse {}", path.display()))?;
    for warning in &parsed.warnings {
        eprintln!("warning: {}", warning);
    }
    let formatted = parsed.document.format();

    if matches.get_flag("check") {
        if formatted == source {
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("{} is not in canonical form", path.display());
        return Ok(ExitCode::from(1));
    }

    if formatted != source {
        fs::write(&path, formatted).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("reformatted {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_find_command(config: &DtlConfig, matches: &ArgMatches) -> Result<ExitCode> {
    let path = journal_path(config, matches);
    let doc = load_journal(&path)?;
    let ongoing = if matches.get_flag("ongoing") {
        Some(true)
    } else if matches.get_flag("static") {
        Some(false)
    } else {
        None
    };

    for segment in doc.find(description(matches), ongoing) {
        print_entry(&segment.time, segment.ongoing, segment.description.as_deref());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_add_command(config: &DtlConfig, matches: &ArgMatches, ongoing: bool) -> Result<ExitCode> {
    let path = journal_path(config, matches);
    let description = description(matches);
    let mut doc = load_journal(&path)?;

    if ongoing && !doc.find(description, Some(true)).is_empty() {
        bail!("an ongoing entry [{}] already exists", description);
    }

    let now = TimeValue::now();
    if !doc.create_entry(now.clone(), description, ongoing) {
        bail!("current time {} is outside of the journal scope {}", now, doc.header);
    }
    save_journal(&path, &doc)?;
    print_entry(&now, ongoing, Some(description));
    Ok(ExitCode::SUCCESS)
}

fn handle_end_command(config: &DtlConfig, matches: &ArgMatches) -> Result<ExitCode> {
    let path = journal_path(config, matches);
    let description = description(matches);
    let mut doc = load_journal(&path)?;

    let found = doc.find_with_parent(description, Some(true));
    let target = match (found.len(), matches.get_one::<usize>("index").copied()) {
        (0, _) => bail!("no ongoing entry [{}]", description),
        (1, None) => &found[0],
        (count, None) => {
            for (i, hit) in found.iter().enumerate() {
                eprintln!("  {}: @{}", i + 1, hit.segment.time);
            }
            bail!(
                "{} ongoing entries [{}]; choose one with --index",
                count,
                description
            )
        }
        (count, Some(index)) if index == 0 || index > count => {
            bail!("--index must be between 1 and {}", count)
        }
        (_, Some(index)) => &found[index - 1],
    };
    let target_path = target.path.clone();
    let start = target.segment.time.clone();

    let end = TimeValue::now();
    if !doc.end_entry(&target_path, end.clone()) {
        bail!("entry at {} could not be closed", target_path);
    }
    save_journal(&path, &doc)?;
    print_entry(&start.with_period_end(end), false, Some(description));
    Ok(ExitCode::SUCCESS)
}

fn print_entry(time: &TimeValue, ongoing: bool, description: Option<&str>) {
    let marker = if ongoing && !time.is_open() { "..." } else { "" };
    match description {
        Some(description) => println!("@{}{} [{}]", time, marker, description),
        None => println!("@{}{}", time, marker),
    }
}
