//! Run coordination
//!
//! Drives the whole pipeline: enumerate branches for a level, fan the
//! course fetches out through the bounded runner, persist the results, then
//! move to the next level. Levels run strictly sequentially; concurrency is
//! bounded within a level's course fetches only, by one gate shared across
//! the entire run.

use crate::config::Config;
use crate::levels::ProgramLevel;
use crate::output::{
    export_course_code_index, export_options, list_date_dirs, write_schedule_csv, CourseCodeIndex,
};
use crate::scrape::branches::list_branches;
use crate::scrape::course::{fetch_course, FetchOutcome};
use crate::scrape::fetcher::build_http_client;
use crate::scrape::runner::run_all;
use crate::{HarvestError, Result};
use reqwest::Client;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// What to process in one run
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Restrict to one program level; `None` processes all of them
    pub level: Option<ProgramLevel>,

    /// Restrict to these course codes; `None` processes every branch
    pub courses: Option<HashSet<String>>,
}

/// What one level produced
#[derive(Debug, Default)]
pub struct LevelReport {
    /// Course codes attempted for this level (post-filter)
    pub attempted: BTreeSet<String>,

    /// Number of codes for which a CSV file was actually written
    pub written: usize,
}

/// What the whole run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Run date, `YYYY-MM-DD`
    pub date: String,

    /// Union of attempted course codes across levels
    pub all_codes: BTreeSet<String>,

    /// Total CSV files written
    pub files_written: usize,
}

/// Processes one program level end to end
///
/// Enumerates branches, applies the optional course-code filter, runs the
/// course fetches through the shared gate, and writes one CSV per course
/// that produced a table. An empty branch list (or a filter matching
/// nothing) is a valid terminal state: the runner is never invoked and an
/// empty report comes back.
///
/// # Arguments
///
/// * `client` - The run's HTTP client
/// * `config` - Harvest configuration
/// * `gate` - The run-wide concurrency gate
/// * `level` - The level to process
/// * `filter` - Optional course-code restriction
/// * `date_dir` - Directory for this run date's CSV files
pub async fn process_level(
    client: &Client,
    config: &Arc<Config>,
    gate: Arc<Semaphore>,
    level: ProgramLevel,
    filter: Option<&HashSet<String>>,
    date_dir: &Path,
) -> Result<LevelReport> {
    tracing::info!("Processing {}", level);

    let mut branches = list_branches(client, config, level).await?;
    if branches.is_empty() {
        tracing::info!("No branch codes found for {}, skipping", level.display_name());
        return Ok(LevelReport::default());
    }

    if let Some(filter) = filter {
        branches.retain(|b| filter.contains(&b.course_code));
        if branches.is_empty() {
            tracing::info!(
                "No branch codes match the course filter for {}",
                level.display_name()
            );
            return Ok(LevelReport::default());
        }
        tracing::info!(
            "Filtered to {} course codes for {}",
            branches.len(),
            level.display_name()
        );
    }

    tracing::info!(
        "Found {} course codes for {}",
        branches.len(),
        level.display_name()
    );

    let tasks: Vec<_> = branches
        .iter()
        .map(|branch| {
            let client = client.clone();
            let config = Arc::clone(config);
            let code = branch.course_code.clone();
            let branch_id = branch.branch_id;
            async move { fetch_course(&client, &config, level, branch_id, &code).await }
        })
        .collect();

    let outcomes = run_all(tasks, gate, level.display_name()).await;

    let mut written = 0;
    for (branch, outcome) in branches.iter().zip(outcomes) {
        match outcome {
            FetchOutcome::Table(table) => {
                let path = date_dir.join(level.csv_file_name(&branch.course_code));
                write_schedule_csv(&path, &table)?;
                written += 1;
            }
            FetchOutcome::NoData => {}
            FetchOutcome::Failed(msg) => {
                tracing::warn!(
                    "Course {} ({}) failed: {}",
                    branch.course_code,
                    level.key(),
                    msg
                );
            }
        }
    }

    let attempted: BTreeSet<String> =
        branches.into_iter().map(|b| b.course_code).collect();

    tracing::info!(
        "Processed {} of {} courses for {}",
        written,
        attempted.len(),
        level.display_name()
    );

    Ok(LevelReport { attempted, written })
}

/// Runs the whole harvest
///
/// Bootstraps the output directories, processes the selected levels
/// sequentially, and emits the aggregate index files once everything has
/// finished. A level whose branch enumeration fails is logged and skipped;
/// the run carries on. Only filesystem and client-construction errors are
/// fatal.
pub async fn run(config: Config, options: RunOptions) -> Result<RunSummary> {
    let config = Arc::new(config);
    let date = chrono::Local::now().date_naive().to_string();

    let root = Path::new(&config.output_root).to_path_buf();
    let date_dir = root.join(&date);
    std::fs::create_dir_all(&date_dir)?;

    let client = build_http_client(&config)?;

    // One gate for the whole run, reused by every level's batch
    let gate = Arc::new(Semaphore::new(config.max_concurrent_requests as usize));

    let levels: Vec<ProgramLevel> = match options.level {
        Some(level) => vec![level],
        None => ProgramLevel::ALL.to_vec(),
    };

    let mut all_codes = BTreeSet::new();
    let mut by_level: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    let mut files_written = 0;

    for level in levels {
        let report = match process_level(
            &client,
            &config,
            Arc::clone(&gate),
            level,
            options.courses.as_ref(),
            &date_dir,
        )
        .await
        {
            Ok(report) => report,
            Err(HarvestError::Scrape(e)) => {
                // Fatal to this level only; the run moves on
                tracing::error!("Skipping {}: {}", level.display_name(), e);
                continue;
            }
            Err(e) => return Err(e),
        };

        all_codes.extend(report.attempted.iter().cloned());
        by_level
            .entry(level.key())
            .or_default()
            .extend(report.attempted);
        files_written += report.written;
    }

    let dates = list_date_dirs(&root)?;
    export_options(&root.join("dates.json"), &dates)?;

    let sorted_codes: Vec<String> = all_codes.iter().cloned().collect();
    export_options(&root.join("course_codes.json"), &sorted_codes)?;

    export_course_code_index(
        &root.join("course_codes_by_level.json"),
        &CourseCodeIndex::new(&all_codes, &by_level),
    )?;

    tracing::info!(
        "Run complete: {} files written, {} unique course codes",
        files_written,
        all_codes.len()
    );

    Ok(RunSummary {
        date,
        all_codes,
        files_written,
    })
}
