//! Output module for persisted artifacts
//!
//! This module handles everything written to disk:
//! - Per-course CSV exports of schedule tables
//! - The JSON index files summarizing run dates and course codes

mod csv;
mod index;

pub use csv::write_schedule_csv;
pub use index::{export_course_code_index, export_options, list_date_dirs, CourseCodeIndex};
