//! # cohort-table
//!
//! A CLI for rendering cohort-analysis reports as tables.
//!
//! ## Overview
//!
//! cohort-table is built on top of cohortlib. It reads a reporting API
//! response (from a file or stdin), groups the first report's rows by
//! cohort and prints the result as HTML, JSON or a plain terminal table.
//!
//! ## Usage
//!
//! ```bash
//! # Render a weekly cohort report as HTML
//! cohort-table response.json --cohort-size Week
//!
//! # Take the cohort size from the host application's settings
//! cohort-table response.json --settings settings.json
//!
//! # Read from stdin, print the display grid as JSON
//! cat response.json | cohort-table --output json
//!
//! # Aligned table for the terminal
//! cohort-table response.json -s Day --output text
//! ```

mod render;

use std::io::Read;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use cohortlib::{load_settings, render_html, tablize, CohortSize, Response, Settings};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::render::{render_grid, OutputMode};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("cohort-table")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render cohort-analysis reports as tables")
        .arg(
            Arg::new("input")
                .help("Response JSON file ('-' or omitted reads stdin)")
                .default_value("-"),
        )
        .arg(
            Arg::new("cohort-size")
                .short('s')
                .long("cohort-size")
                .value_parser(["Day", "Week", "Month"])
                .ignore_case(true)
                .help("Cohort size the report was requested with (overrides --settings)"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings JSON file providing responseCohortSize"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["html", "json", "markup", "text"])
                .default_value("html")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v debug, -vv trace)"),
        )
}

/// Install the stderr log subscriber. RUST_LOG wins over -v.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Read the response JSON from a path, or stdin for "-"
fn read_response(input: &str) -> anyhow::Result<Response> {
    if input == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read response from stdin")?;
        Response::from_json_str(&contents).context("failed to parse response from stdin")
    } else {
        cohortlib::load_response(input).with_context(|| format!("failed to load '{}'", input))
    }
}

/// Resolve settings: --cohort-size beats --settings, which beats the default
fn resolve_settings(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let mut settings = match matches.get_one::<String>("settings") {
        Some(path) => {
            load_settings(path).with_context(|| format!("failed to load settings '{}'", path))?
        }
        None => Settings::default(),
    };

    if let Some(size) = matches.get_one::<String>("cohort-size") {
        settings = settings.cohort_size(CohortSize::from_str(size)?);
    }

    Ok(settings)
}

/// Produce the output text for the parsed arguments
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let input = matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let format = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("html");

    let settings = resolve_settings(matches)?;
    debug!(cohort_size = %settings.response_cohort_size, format, "resolved options");

    let response = read_response(input)?;

    let mut output = match format {
        "html" => render_html(&response, &settings)?,
        "markup" => serde_json::to_string_pretty(&cohortlib::render(&response, &settings)?)?,
        _ => {
            let grid = tablize(response.first_report()?, settings.response_cohort_size)?;
            info!(rows = grid.rows.len(), "built cohort table");
            let output_mode = match format {
                "json" => OutputMode::Json,
                _ => OutputMode::Auto,
            };
            render_grid(&grid, output_mode)?
        }
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
