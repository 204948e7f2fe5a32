//! Scrape module: the fetch-and-normalize pipeline
//!
//! This module contains the core pipeline logic:
//! - Retrying HTTP fetching
//! - Branch enumeration per program level
//! - Per-course schedule fetching and table normalization
//! - Bounded concurrent execution with ordered fan-in
//! - Level-by-level run coordination

mod branches;
mod coordinator;
mod course;
mod fetcher;
mod parser;
mod runner;

pub use branches::{list_branches, BranchEntry};
pub use coordinator::{process_level, run, LevelReport, RunOptions, RunSummary};
pub use course::{fetch_course, FetchOutcome};
pub use fetcher::{build_http_client, fetch_text};
pub use parser::{normalize_cell, normalize_column, parse_schedule_html, ScheduleTable};
pub use runner::run_all;
