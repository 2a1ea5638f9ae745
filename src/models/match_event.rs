use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One fixture as it appears in the page markup. The date string carries
/// no year; `scrape::dates` resolves it against a reference time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub team_a: String,
    pub team_b: String,
    pub raw_date: String,
}

/// A fixture with its kickoff resolved to an absolute Asia/Shanghai
/// wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMatch {
    pub team_a: String,
    pub team_b: String,
    pub start: NaiveDateTime,
    pub summary: String,
}

impl ResolvedMatch {
    pub fn new(team_a: String, team_b: String, start: NaiveDateTime) -> Self {
        let summary = format!("{} vs {}", team_a, team_b);
        Self {
            team_a,
            team_b,
            start,
            summary,
        }
    }
}
