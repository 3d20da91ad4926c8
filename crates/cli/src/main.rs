//! Sympathy CLI
//!
//! - `sympathy io`: file access strategies over one backing file
//! - `sympathy memory`: traversal orders over one word region
//! - `sympathy env`: the host the numbers were measured on
//! - `sympathy init`: write a commented `sympathy.toml`
//!
//! Results go to stdout (tab-separated, or JSON lines with `--json`); logs go
//! to stderr and are filtered by `RUST_LOG` (default `info`).
//!
//! Exit status: 0 when every strategy verified, 1 on a fatal error, 2 when
//! at least one strategy failed.

mod commands;
mod parse;

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::ArgMatches;
use sympathy_runner::{
    Environment, ExperimentFile, ExperimentRunner, ExperimentSummary, JsonLinesReporter,
    ResultSink, TextReporter, CONFIG_FILE_NAME,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use parse::{apply_io_overrides, apply_memory_overrides, load_settings};

const EXIT_FATAL: i32 = 1;
const EXIT_STRATEGY_FAILED: i32 = 2;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            error!(target: "sympathy::cli", "{:#}", e);
            EXIT_FATAL
        }
    };
    process::exit(code);
}

fn run(matches: &ArgMatches) -> Result<i32> {
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("io", sub)) => {
            let mut file = load_settings(matches)?;
            apply_io_overrides(&mut file, sub)?;
            let (config, settings) = file.io_config()?;
            log_environment();

            let runner = ExperimentRunner::new(config).with_settle(file.settle);
            let summary = with_sink(json, |sink| runner.run_io(&settings, sink))?;
            Ok(finish(&summary))
        }
        Some(("memory", sub)) => {
            let mut file = load_settings(matches)?;
            apply_memory_overrides(&mut file, sub)?;
            let (config, settings) = file.memory_config()?;
            log_environment();

            let runner = ExperimentRunner::new(config);
            let summary = with_sink(json, |sink| runner.run_memory(&settings, sink))?;
            Ok(finish(&summary))
        }
        Some(("env", _)) => {
            let env = Environment::capture();
            if json {
                println!("{}", env.to_json());
            } else {
                print!("{}", env.report());
            }
            Ok(0)
        }
        Some(("init", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            if path.exists() {
                warn!(target: "sympathy::cli", path = %path.display(), "Settings file already exists, leaving it alone");
            } else {
                ExperimentFile::write_default_if_missing(&path)?;
                info!(target: "sympathy::cli", path = %path.display(), "Wrote default settings");
            }
            Ok(0)
        }
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given"),
    }
}

/// Run `f` with a reporter on stdout.
fn with_sink<T>(
    json: bool,
    f: impl FnOnce(&mut dyn ResultSink) -> sympathy_core::Result<T>,
) -> sympathy_core::Result<T> {
    let stdout = io::stdout();
    let out = stdout.lock();
    if json {
        f(&mut JsonLinesReporter::new(out))
    } else {
        f(&mut TextReporter::new(out))
    }
}

fn log_environment() {
    let env = Environment::capture();
    info!(target: "sympathy::cli", environment = %env.summary(), "Host");
}

fn finish(summary: &ExperimentSummary) -> i32 {
    for outcome in &summary.outcomes {
        match &outcome.failure {
            None => info!(
                target: "sympathy::cli",
                strategy = %outcome.strategy,
                verified = outcome.verified_trials,
                "Strategy verified"
            ),
            Some(e) => error!(
                target: "sympathy::cli",
                strategy = %outcome.strategy,
                verified = outcome.verified_trials,
                error = %e,
                "Strategy failed"
            ),
        }
    }
    if summary.all_verified() {
        0
    } else {
        EXIT_STRATEGY_FAILED
    }
}
