//! rusty-fxgraph CLI - convert amounts through a graph of exchange rates
//!
//! Each input file is an independent request; files are processed in order
//! and a failing file does not stop the ones after it.
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert and print the result
//! rusty-fxgraph example.txt
//!
//! # Several files, showing the hops taken
//! rusty-fxgraph --show-path a.txt b.txt
//!
//! # JSON output with debug logging
//! RUST_LOG=debug rusty-fxgraph --format json example.txt
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rusty_fxgraph::input::RateFile;
use rusty_fxgraph::request::Conversion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

const INPUT_FORMAT_HELP: &str = "\
Input file format (fields separated by ';'):
  EUR;550;JPY       convert 550 EUR to JPY
  6                 number of exchange rates that follow
  AUD;CHF;0.9661    1 AUD buys 0.9661 CHF
  JPY;KRW;13.1151
  EUR;CHF;1.2053
  AUD;JPY;86.0305
  EUR;USD;1.2989
  JPY;INR;0.6571

Each rate can be used in both directions. A currency pair may appear only
once, in either direction. The conversion follows the path with the fewest
exchanges, not the best rate.";

/// rusty-fxgraph: fewest-hop currency converter
#[derive(Parser, Debug)]
#[command(name = "rusty-fxgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Robert Fall")]
#[command(about = "Convert an amount between currencies through a graph of exchange rates", long_about = None)]
#[command(after_help = INPUT_FORMAT_HELP)]
struct Cli {
    /// Input files, one conversion request each
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the currencies and rates used under each result
    #[arg(short = 'p', long)]
    show_path: bool,

    /// Output format (overrides the config file)
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    show_path: bool,
    #[serde(default)]
    format: OutputFormat,
    #[serde(default = "default_color")]
    color: bool,
}

fn default_color() -> bool {
    true
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rusty-fxgraph").join("config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_path: false,
            format: OutputFormat::default(),
            color: default_color(),
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        if let Some(config_path) = path {
            match fs::read_to_string(config_path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                    }
                },
                Err(e) => {
                    eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                }
            }
        } else if let Some(default_config) = default_config_path() {
            // Try default location
            if default_config.exists() {
                if let Ok(contents) = fs::read_to_string(&default_config) {
                    if let Ok(config) = toml::from_str(&contents) {
                        return config;
                    }
                }
            }
        }

        Config::default()
    }
}

/// Effective output settings after applying command-line overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    show_path: bool,
    format: OutputFormat,
    color: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            show_path: cli.show_path || config.show_path,
            format: cli.format.unwrap_or(config.format),
            color: config.color && !cli.no_color,
        }
    }
}

/// One line of JSON output
#[derive(Debug, Serialize)]
struct Report {
    file: String,
    source: String,
    destination: String,
    amount: u64,
    result: u64,
    hops: usize,
    path: Vec<String>,
    rates: Vec<f64>,
}

impl Report {
    fn new(file: &Path, conversion: &Conversion) -> Self {
        Self {
            file: file.display().to_string(),
            source: conversion.request.source.to_string(),
            destination: conversion.request.destination.to_string(),
            amount: conversion.request.amount,
            result: conversion.result,
            hops: conversion.hop_count(),
            path: conversion.path().iter().map(ToString::to_string).collect(),
            rates: conversion.steps.iter().map(|step| step.rate).collect(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn process_file(path: &Path) -> anyhow::Result<Conversion> {
    let file = RateFile::from_path(path).with_context(|| path.display().to_string())?;
    let conversion = file.run().with_context(|| path.display().to_string())?;
    Ok(conversion)
}

fn render(path: &Path, conversion: &Conversion, settings: &Settings) -> anyhow::Result<String> {
    match settings.format {
        OutputFormat::Json => Ok(serde_json::to_string(&Report::new(path, conversion))?),
        OutputFormat::Text => {
            let mut out = conversion.result.to_string();
            if settings.show_path {
                out.push('\n');
                out.push_str(&format!("  {}", conversion.request.source));
                for step in &conversion.steps {
                    out.push_str(&format!(" -({:.4})-> {}", step.rate, step.to));
                }
            }
            Ok(out)
        }
    }
}

/// Process every file in order, returning how many failed
///
/// Results go to `out`, one per successful file; each failure is reported on
/// `err` and processing moves on to the next file.
fn run<W: Write, E: Write>(
    files: &[PathBuf],
    settings: &Settings,
    out: &mut W,
    err: &mut E,
) -> usize {
    let mut failures = 0usize;
    for path in files {
        let output = process_file(path)
            .and_then(|conversion| render(path, &conversion, settings))
            .and_then(|text| writeln!(out, "{}", text).map_err(anyhow::Error::from));
        if let Err(e) = output {
            // Nowhere left to report a failing stderr
            let _ = writeln!(err, "{} {:#}", "Error:".red().bold(), e);
            failures += 1;
        }
    }
    failures
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref());
    let settings = Settings::resolve(&cli, &config);
    if !settings.color {
        colored::control::set_override(false);
    }

    let failures = run(
        &cli.files,
        &settings,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );

    if failures > 0 {
        log::info!("{} of {} request(s) failed", failures, cli.files.len());
        process::exit(1);
    }
}
