use std::fs;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use demoinfo_core::{BatchSummary, DecodeFileError, DemoInfo, decode_batch};
use glob::{MatchOptions, Pattern, glob_with};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("DEMOINFO_BUILD_COMMIT"),
    ", ",
    env!("DEMOINFO_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "demoinfo")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode match-info (.info) files into JSON records.",
    long_about = None,
    after_help = "Examples:\n  demoinfo decode replays/ -o out/\n  demoinfo parse replays/ --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode every top-level .info file of a directory.
    #[command(alias = "parse")]
    Decode {
        /// Directory containing .info files
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output directory for <name>.json records
        #[arg(short = 'o', long, default_value = ".", conflicts_with = "stdout")]
        out_dir: PathBuf,

        /// Write JSON records to stdout, one per line
        #[arg(long)]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Only report failures
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any file fails to decode
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            dir,
            out_dir,
            stdout,
            pretty,
            compact: _,
            quiet,
            strict,
        } => {
            init_tracing(quiet);
            let output = if stdout { Output::Stdout } else { Output::Dir(out_dir) };
            cmd_decode(&dir, output, pretty, strict)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "error" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

#[derive(Debug)]
enum Output {
    Stdout,
    Dir(PathBuf),
}

#[derive(Serialize)]
struct StdoutRecord<'a> {
    file: String,
    info: &'a DemoInfo,
}

/// Writes each decoded record and reports each failure on stderr; never
/// stops the batch.
struct JsonSink {
    output: Output,
    pretty: bool,
    write_failures: usize,
}

impl demoinfo_core::RecordSink for JsonSink {
    fn record(&mut self, path: &Path, result: Result<DemoInfo, DecodeFileError>) {
        let name = display_name(path);
        match result {
            Ok(info) => {
                if let Err(err) = self.emit(path, &info) {
                    self.write_failures += 1;
                    eprintln!("error: {name}: {err:#}");
                    tracing::error!(file = %name, "{err:#}");
                }
            }
            Err(err) => {
                eprintln!("error: {name}: {err}");
                tracing::error!(file = %name, "decode failed: {err}");
            }
        }
    }
}

impl JsonSink {
    fn emit(&self, path: &Path, info: &DemoInfo) -> anyhow::Result<()> {
        match &self.output {
            Output::Stdout => {
                let record = StdoutRecord {
                    file: display_name(path),
                    info,
                };
                let json = to_json(&record, self.pretty)?;
                writeln!(std::io::stdout().lock(), "{json}")
                    .context("Failed to write record to stdout")?;
            }
            Output::Dir(dir) => {
                let target = output_path(dir, path);
                fs::write(&target, to_json(info, self.pretty)?)
                    .with_context(|| format!("Failed to write record: {}", target.display()))?;
                tracing::info!(
                    file = %display_name(path),
                    rounds = info.rounds.len(),
                    "OK: record written -> {}",
                    target.display()
                );
            }
        }
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("JSON serialization failed")
    } else {
        serde_json::to_string(value).context("JSON serialization failed")
    }
}

fn cmd_decode(dir: &Path, output: Output, pretty: bool, strict: bool) -> Result<(), CliError> {
    validate_input_dir(dir)?;
    let inputs = find_info_files(dir)?;

    if let Output::Dir(out_dir) = &output {
        fs::create_dir_all(out_dir).with_context(|| {
            format!("Failed to create output directory: {}", out_dir.display())
        })?;
    }

    let mut sink = JsonSink {
        output,
        pretty,
        write_failures: 0,
    };
    let summary = with_write_failures(decode_batch(&inputs, &mut sink), sink.write_failures);
    tracing::info!(
        decoded = summary.decoded,
        failed = summary.failed,
        "processed {} file(s)",
        inputs.len()
    );

    if strict && summary.failed > 0 {
        return Err(CliError::new(
            format!("{} of {} file(s) failed", summary.failed, inputs.len()),
            Some("run without --strict to ignore failures".to_string()),
        ));
    }
    Ok(())
}

/// A record that decoded but could not be written counts as failed only.
fn with_write_failures(summary: BatchSummary, write_failures: usize) -> BatchSummary {
    BatchSummary {
        decoded: summary.decoded.saturating_sub(write_failures),
        failed: summary.failed + write_failures,
    }
}

fn validate_input_dir(dir: &Path) -> Result<(), CliError> {
    if !dir.exists() {
        return Err(CliError::new(
            format!("input directory not found: {}", dir.display()),
            Some("pass a directory containing .info files".to_string()),
        ));
    }
    if !dir.is_dir() {
        return Err(CliError::new(
            format!("input is not a directory: {}", dir.display()),
            Some("pass a directory containing .info files".to_string()),
        ));
    }
    Ok(())
}

fn find_info_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.{}", escaped, demoinfo_core::INFO_EXTENSION);
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let entries = glob_with(&pattern, options).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("failed to read '{}'", err.path().display()),
                Some(format!("{}", err.error())),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no .info files found in '{}'", dir.display()),
            Some("match-info files are written next to downloaded replays".to_string()),
        ));
    }
    Ok(matches)
}

fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());
    out_dir.join(format!("{stem}.json"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
