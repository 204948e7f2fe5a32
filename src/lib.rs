//! Ders-Harvest: a course-schedule fetcher
//!
//! This crate pulls course-schedule tables for every program level of the
//! university's public schedule API and persists each course as a dated CSV
//! file, plus JSON index files describing which run dates and course codes
//! are available.

pub mod config;
pub mod levels;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for Ders-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Terminal failure of a retried fetch
///
/// Produced only after the full attempt budget is spent; individual attempt
/// failures are retried internally and never surface to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} failed after {attempts} attempts: {source}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: AttemptError,
    },
}

/// What went wrong on a single fetch attempt
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// Errors from the scrape pipeline above the raw-fetch layer
///
/// Either variant is fatal to one level only; the run coordinator logs it
/// and moves on to the next level.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to decode branch list for level {level}: {source}")]
    BranchDecode {
        level: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for Ders-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use levels::ProgramLevel;
pub use scrape::{
    fetch_course, list_branches, parse_schedule_html, run, BranchEntry, FetchOutcome,
    ScheduleTable,
};
