// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of `stats-bench`.
//!
//! Exit status: [`EXIT_PASSED`] when every selected case passes, [`EXIT_FAILED`]
//! when any case fails or errors, [`EXIT_INVALID`] when the arguments,
//! configuration or case selection are invalid.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use batterystats::BatteryStatsClient;
use clap::Parser;

use crate::config::SuiteConfig;
use crate::suite::{find_case, run_cases, sample_backend, BenchCase, CaseReport, CASES};

/// Every selected case passed.
pub const EXIT_PASSED: u8 = 0;
/// At least one case failed its threshold or could not complete.
pub const EXIT_FAILED: u8 = 1;
/// Bad arguments, configuration or case name.
pub const EXIT_INVALID: u8 = 2;

/// Arguments accepted by `stats-bench`.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "stats-bench")]
#[command(about = "Latency smoke test for the battery statistics client")]
pub struct Args {
    /// TOML file overriding repetitions, threshold, uid or category.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Case to run; repeat to select several. Defaults to every case.
    #[arg(long = "case", value_name = "NAME")]
    pub cases: Vec<String>,

    /// Print reports as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// List case names and exit.
    #[arg(long)]
    pub list: bool,
}

/// Resolves case names, keeping their order. No names selects every case.
pub fn select(names: &[String]) -> Result<Vec<&'static BenchCase>, String> {
    if names.is_empty() {
        return Ok(CASES.iter().collect());
    }
    names
        .iter()
        .map(|name| find_case(name).ok_or_else(|| format!("unknown case `{name}`")))
        .collect()
}

fn load_config(path: Option<&Path>) -> Option<SuiteConfig> {
    match path {
        None => Some(SuiteConfig::default()),
        Some(path) => match SuiteConfig::load(path) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("{err}");
                None
            }
        },
    }
}

fn write_text<W: Write>(out: &mut W, report: &CaseReport) -> io::Result<()> {
    let r = &report.result;
    writeln!(
        out,
        "{:<32} {:<34} {:>6} calls {:>12.3} ms {:>12.3} us/call  {}",
        report.name,
        report.api.method(),
        r.repetitions,
        r.total_elapsed_millis,
        r.average_micros,
        if r.passed { "PASS" } else { "FAIL" }
    )
}

fn list_cases<W: Write>(out: &mut W) -> io::Result<()> {
    for case in &CASES {
        writeln!(out, "{}\t{}", case.name, case.api.method())?;
    }
    Ok(())
}

fn finish(written: io::Result<()>, status: u8) -> u8 {
    match written {
        Ok(()) => status,
        Err(err) => {
            log::error!("failed to write output: {err}");
            EXIT_FAILED
        }
    }
}

/// Runs the selected cases against `client` and writes the reports to `out`.
///
/// Drives the cases on its own current-thread runtime, so it must not be
/// called from inside another tokio runtime.
pub fn execute_with<C, W>(client: &C, args: &Args, out: &mut W) -> u8
where
    C: BatteryStatsClient,
    W: Write,
{
    if args.list {
        return finish(list_cases(out), EXIT_PASSED);
    }
    let Some(config) = load_config(args.config.as_deref()) else {
        return EXIT_INVALID;
    };
    let cases = match select(&args.cases) {
        Ok(cases) => cases,
        Err(msg) => {
            log::error!("{msg}");
            return EXIT_INVALID;
        }
    };
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("failed to start runtime: {err}");
            return EXIT_FAILED;
        }
    };
    let outcomes = runtime.block_on(run_cases(client, &config, &cases));

    let mut status = EXIT_PASSED;
    let mut reports = Vec::with_capacity(outcomes.len());
    for (case, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                if !report.result.passed {
                    status = EXIT_FAILED;
                }
                reports.push(report);
            }
            Err(err) => {
                status = EXIT_FAILED;
                log::error!("{}: {err}", case.name);
            }
        }
    }

    let written = if args.json {
        serde_json::to_writer_pretty(&mut *out, &reports)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out))
    } else {
        reports.iter().try_for_each(|report| write_text(&mut *out, report))
    };
    finish(written, status)
}

/// Parses `argv` (without the program name) and runs against the seeded host backend.
pub fn execute<W: Write>(argv: &[&str], out: &mut W) -> u8 {
    let args = match Args::try_parse_from(std::iter::once("stats-bench").chain(argv.iter().copied()))
    {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => {
            return finish(write!(out, "{}", err.render()), EXIT_PASSED);
        }
        Err(err) => {
            log::error!("{err}");
            return EXIT_INVALID;
        }
    };
    match sample_backend() {
        Ok(backend) => execute_with(&backend, &args, out),
        Err(err) => {
            log::error!("failed to seed host backend: {err}");
            EXIT_FAILED
        }
    }
}

/// Parses `std::env::args` and runs, writing reports to stdout.
pub fn run() -> ExitCode {
    let args = Args::parse();
    let backend = match sample_backend() {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("failed to seed host backend: {err}");
            return ExitCode::from(EXIT_FAILED);
        }
    };
    let stdout = io::stdout();
    ExitCode::from(execute_with(&backend, &args, &mut stdout.lock()))
}
