//! Ders-Harvest main entry point
//!
//! Command-line interface for fetching course schedules from the public
//! schedule API and exporting them as dated CSV files plus JSON indexes.

use clap::Parser;
use ders_harvest::config::{load_config, validate, Config};
use ders_harvest::scrape::{run, RunOptions};
use ders_harvest::ProgramLevel;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fetch course schedules from the schedule API
///
/// Processes every program level (or one, with --level), writes each
/// course's schedule as a dated CSV file, and refreshes the JSON index
/// files under the output root.
#[derive(Parser, Debug)]
#[command(name = "ders-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Fetch course schedules from the schedule API", long_about = None)]
struct Cli {
    /// Filter by specific course codes (e.g. -c BBF AKM)
    #[arg(short, long, num_args = 1.., value_name = "CODE")]
    courses: Option<Vec<String>>,

    /// Filter by program level key (OL, LS, LU, LUI)
    #[arg(short, long, value_name = "KEY", value_parser = clap::value_parser!(ProgramLevel))]
    level: Option<ProgramLevel>,

    /// Path to a TOML configuration file (defaults apply without one)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            config
        }
    };

    let options = RunOptions {
        level: cli.level,
        courses: cli
            .courses
            .as_ref()
            .map(|codes| codes.iter().cloned().collect::<HashSet<String>>()),
    };

    let output_root = config.output_root.clone();
    let summary = run(config, options).await?;

    println!("Completed! Data saved to {}/{}/", output_root, summary.date);
    println!("Total unique course codes: {}", summary.all_codes.len());
    println!("Files written: {}", summary.files_written);
    if let Some(courses) = &cli.courses {
        let mut sorted = courses.clone();
        sorted.sort();
        println!("Filtered courses: {}", sorted.join(", "));
    }
    if let Some(level) = cli.level {
        println!("Filtered level: {}", level);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ders_harvest=info,warn"),
            1 => EnvFilter::new("ders_harvest=debug,info"),
            2 => EnvFilter::new("ders_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
