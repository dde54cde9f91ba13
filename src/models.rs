// Data models for TodoStore

use chrono::NaiveDate;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar format accepted for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a to-do item, handed out by a store's monotonic counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(TodoId)
            .with_context(|| format!("Invalid item id: {:?}", s))
    }
}

/// Progress of a to-do item; also the tab an item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    /// Every status, in tab order
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// Human-readable tab title
    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not started",
            Status::InProgress => "In progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "notstarted" | "todo" => Ok(Status::NotStarted),
            "inprogress" | "active" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            _ => Err(eyre!(
                "Unknown status: {:?} (expected not-started, in-progress or completed)",
                s
            )),
        }
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub created_at: i64,
}

impl TodoItem {
    pub fn new(id: TodoId, text: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id,
            text: text.into(),
            status: Status::NotStarted,
            due_date,
            created_at: now_ms(),
        }
    }

    /// Completion is derived from the status, never stored separately
    pub fn completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Checkbox shortcut: Completed when switched on, NotStarted when switched off
    ///
    /// An InProgress item toggled twice ends up NotStarted, not InProgress.
    pub fn toggle_completed(&mut self) {
        self.status = if self.completed() {
            Status::NotStarted
        } else {
            Status::Completed
        };
    }
}

/// Parse a due date in `YYYY-MM-DD` form
///
/// An empty (or whitespace-only) input means no due date.
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .with_context(|| format!("Invalid due date: {:?} (expected YYYY-MM-DD)", input))
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
