use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use yamlpath_copier::clipboard::copy_to_clipboard;
use yamlpath_copier::config::{Config, OutputFormat};
use yamlpath_copier::file::loader::{load_document, load_from_stdin};
use yamlpath_copier::logging;
use yamlpath_copier::yamlpath::{find_yaml_path, offset_at, PathSegment, Position};
use yamlpath_copier::Error;

/// yamlpath-copier - copy the YAML path under the cursor
#[derive(Parser)]
#[command(name = "yamlpath-copier")]
#[command(version)]
#[command(about = "Print (and copy) the YAML key path at a cursor position", long_about = None)]
struct Cli {
    /// YAML file to inspect (omit or pass "-" to read stdin)
    file: Option<PathBuf>,

    /// Zero-based line of the cursor
    #[arg(short, long)]
    line: usize,

    /// Zero-based character within the line
    #[arg(short, long)]
    character: usize,

    /// Do not write the path to the clipboard
    #[arg(long)]
    no_copy: bool,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level: off, error, warn, info, debug, trace (overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Config file to use instead of ~/.config/yamlpath-copier/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Machine-readable result for `--format json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    path: String,
    segments: &'a [PathSegment],
    offset: usize,
}

/// No addressable node at the position
const EXIT_NO_PATH: u8 = 1;
/// The text could not be parsed or the position does not fit it
const EXIT_FAILURE: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.no_copy {
        config.copy_to_clipboard = false;
    }

    logging::init(config.level_filter());

    let (text, name) = match &cli.file {
        Some(path) if path.as_os_str() != "-" => {
            (load_document(path)?, path.display().to_string())
        }
        _ => (load_from_stdin()?, "<stdin>".to_string()),
    };

    let position = Position::new(cli.line, cli.character);
    log::info!("File: {}[{}:{}]", name, position.line, position.character);

    run(&text, position, &config)
}

fn run(text: &str, position: Position, config: &Config) -> Result<ExitCode> {
    let path = match find_yaml_path(text, position) {
        Ok(Some(path)) => path,
        Ok(None) => {
            log::error!("No path found");
            return Ok(ExitCode::from(EXIT_NO_PATH));
        }
        Err(Error::Parse { message }) => {
            log::error!("Failed to parse YAML: {}", message);
            eprintln!("Failed to parse YAML");
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
        Err(err @ Error::StalePosition { .. }) => {
            log::error!("{}", err);
            eprintln!("{}", err);
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    let rendered = path.to_string();
    match config.output_format {
        OutputFormat::Text => println!("{}", rendered),
        OutputFormat::Json => {
            let output = JsonOutput {
                path: rendered.clone(),
                segments: path.segments(),
                offset: offset_at(text, position)?,
            };
            println!(
                "{}",
                serde_json::to_string(&output).context("Failed to serialize output")?
            );
        }
    }

    if config.copy_to_clipboard {
        match copy_to_clipboard(&rendered) {
            Ok(()) => log::info!("Copied: '{}'", rendered),
            Err(err) => log::warn!("{:#}", err),
        }
    }

    Ok(ExitCode::SUCCESS)
}
