//! Program level definitions
//!
//! The schedule API groups courses under four enrollment tiers, each with a
//! stable key used both in upstream query parameters and in output file
//! naming.

use std::fmt;
use std::str::FromStr;

/// One of the institution's enrollment tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgramLevel {
    Associate,
    Undergraduate,
    Graduate,
    GraduateEvening,
}

impl ProgramLevel {
    /// All levels, in the order they are processed
    pub const ALL: [ProgramLevel; 4] = [
        ProgramLevel::Associate,
        ProgramLevel::Undergraduate,
        ProgramLevel::Graduate,
        ProgramLevel::GraduateEvening,
    ];

    /// Stable upstream key, used in API queries and file names
    pub fn key(&self) -> &'static str {
        match self {
            ProgramLevel::Associate => "OL",
            ProgramLevel::Undergraduate => "LS",
            ProgramLevel::Graduate => "LU",
            ProgramLevel::GraduateEvening => "LUI",
        }
    }

    /// Human-readable name for logs and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            ProgramLevel::Associate => "Associate",
            ProgramLevel::Undergraduate => "Undergraduate",
            ProgramLevel::Graduate => "Graduate",
            ProgramLevel::GraduateEvening => "Graduate Level Evening Education",
        }
    }

    /// Looks up a level by its upstream key
    pub fn from_key(key: &str) -> Option<ProgramLevel> {
        ProgramLevel::ALL.iter().copied().find(|l| l.key() == key)
    }

    /// Output file name for one course's CSV under this level
    ///
    /// Undergraduate predates the other levels in the output format and keeps
    /// its original unprefixed names; every other level gets a key prefix.
    pub fn csv_file_name(&self, course_code: &str) -> String {
        match self {
            ProgramLevel::Undergraduate => format!("{}.csv", course_code),
            _ => format!("{}-{}.csv", self.key(), course_code),
        }
    }
}

impl fmt::Display for ProgramLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.key())
    }
}

impl FromStr for ProgramLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProgramLevel::from_key(s).ok_or_else(|| {
            let known: Vec<&str> = ProgramLevel::ALL.iter().map(|l| l.key()).collect();
            format!("unknown level '{}', expected one of: {}", s, known.join(", "))
        })
    }
}
