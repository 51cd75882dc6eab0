//! `decaytab` command-line entry point.
//!
//! # Responsibility
//! - Map command-line flags onto `CheckerConfig` and run one validation.
//! - Render the report as a plain transcript or JSON.
//! - Exit 0 iff the report is ok.

mod render;

use clap::{Parser, ValueEnum};
use decaytab_core::{
    default_log_level, init_logging, init_stderr_logging, validate_files, CheckerConfig, Dialect,
};
use log::warn;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "decaytab")]
#[command(version)]
#[command(about = "Check decay table consistency against a particle list")]
struct Cli {
    /// Path to the particle list file (e.g. list.dat)
    #[arg(long)]
    plist: PathBuf,

    /// Path to the decay table
    #[arg(long)]
    decays: PathBuf,

    /// Input dialect: numeric codes or particle names
    #[arg(long, value_enum, default_value = "code")]
    dialect: DialectArg,

    /// JSON file with checker settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Absolute error tolerance for sum(BR) = 1
    #[arg(long)]
    abs_tol_br: Option<f64>,

    /// Relative error tolerance for sum(BR) = 1
    #[arg(long)]
    rel_tol_br: Option<f64>,

    /// Deviations above this (but within the error tolerance) are warnings
    #[arg(long)]
    warn_tol_br: Option<f64>,

    /// Error (not warn) if a stable particle has decays
    #[arg(long)]
    strict_stable: bool,

    /// Only check charge; skip baryon number, strangeness and charm
    #[arg(long = "no-bscc", alias = "no-BSCC")]
    no_bscc: bool,

    /// Do not warn when a name only matches through a charge heuristic
    #[arg(long)]
    no_heuristic_warnings: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Print finding counters after a successful run
    #[arg(long)]
    show_ok: bool,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    Code,
    Name,
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Code => Dialect::CodeIndexed,
            DialectArg::Name => Dialect::NameIndexed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("[config error] {message}");
            return ExitCode::FAILURE;
        }
    };

    let report = match validate_files(cli.dialect.into(), &cli.plist, &cli.decays, &config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("[{}] {err}", err.role());
            return ExitCode::FAILURE;
        }
    };

    if let Err(message) = render::emit(&report, cli.format, cli.show_ok) {
        eprintln!("[output error] {message}");
        return ExitCode::FAILURE;
    }
    ExitCode::from(u8::try_from(report.exit_code()).unwrap_or(1))
}

fn start_logging(cli: &Cli) {
    let result = match (&cli.log_dir, &cli.log_level) {
        (Some(dir), level) => {
            let level = level.as_deref().unwrap_or_else(|| default_log_level());
            init_logging(level, &dir.to_string_lossy())
        }
        (None, Some(level)) => init_stderr_logging(level),
        (None, None) => Ok(()),
    };
    if let Err(message) = result {
        eprintln!("[logging disabled] {message}");
    }
}

fn build_config(cli: &Cli) -> Result<CheckerConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(value) = cli.abs_tol_br {
        config.br_error_tolerance = value;
    }
    if let Some(value) = cli.rel_tol_br {
        config.br_relative_tolerance = value;
    }
    if let Some(value) = cli.warn_tol_br {
        config.br_warning_tolerance = value;
    }
    if cli.strict_stable {
        config.strict_stable = true;
    }
    if cli.no_bscc {
        config = config.without_bscc();
    }
    if cli.no_heuristic_warnings {
        config.flag_heuristic_matches = false;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<CheckerConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| {
        warn!(
            "event=config_load module=cli status=error path={}",
            path.display()
        );
        format!("invalid config `{}`: {err}", path.display())
    })
}
