use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::{Parser, ValueEnum};
use jtl2json_core::results::export::{export_json, export_json_pretty, write_report};
use jtl2json_core::{Jtl2JsonError, Mode, Report};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jtl2json")]
#[command(about = "Summarise a JMeter JTL result file as a JSON report")]
#[command(version)]
struct Cli {
    /// JTL (CSV) result file
    file: PathBuf,

    /// Kind of test that produced the file
    #[arg(long, value_enum, default_value = "protocol")]
    mode: ModeArg,

    /// Test name for the report (defaults to the file path)
    #[arg(long)]
    name: Option<String>,

    /// Pretty-print the JSON document
    #[arg(long)]
    pretty: bool,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Format the datetime in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Protocol,
    Browser,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Protocol => Mode::Protocol,
            ModeArg::Browser => Mode::Browser,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(file = %cli.file.display(), "conversion failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Jtl2JsonError> {
    let mode = Mode::from(cli.mode);
    let mut report: Report = if cli.utc {
        mode.convert_in(&cli.file, &Utc)?
    } else {
        mode.convert_in(&cli.file, &Local)?
    };
    if let Some(name) = &cli.name {
        report.test_name = name.clone();
    }

    match &cli.output {
        Some(path) => {
            write_report(&report, path, cli.pretty)?;
            tracing::info!(
                path = %path.display(),
                labels = report.response_times.len(),
                "report written"
            );
        }
        None => {
            let json = if cli.pretty {
                export_json_pretty(&report)?
            } else {
                export_json(&report)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
