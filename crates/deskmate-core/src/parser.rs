//! Free-text task parsing.

use crate::rules::{CATEGORY_RULES, LOCATION_RULES, RuleTable, TimeMatcher};
use chrono::{DateTime, Utc};
use deskmate_protocol::{TaskRecord, TaskStatus};
use log::debug;
use uuid::Uuid;

/// Title used when nothing is left after the time is removed.
pub const UNTITLED_TASK: &str = "Untitled task";

/// Heuristic parser turning a line of text into a [`TaskRecord`].
///
/// Parsing is total: any input yields a record.
#[derive(Debug, Clone)]
pub struct TaskParser {
    time: TimeMatcher,
    locations: RuleTable,
    categories: RuleTable,
}

impl Default for TaskParser {
    fn default() -> Self {
        Self {
            time: TimeMatcher,
            locations: LOCATION_RULES,
            categories: CATEGORY_RULES,
        }
    }
}

impl TaskParser {
    /// Parser using the built-in rule tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into a new `todo` record created at `created_at`.
    pub fn parse(&self, text: &str, created_at: DateTime<Utc>) -> TaskRecord {
        let lower = text.to_lowercase();
        let found = self.time.find(text);

        let (time, title) = match found {
            Some(found) if found.time.is_some() => {
                let mut stripped = String::with_capacity(text.len());
                stripped.push_str(&text[..found.range.start]);
                stripped.push_str(&text[found.range.end..]);
                (found.time, stripped)
            }
            _ => (None, text.to_string()),
        };
        let title = match title.trim() {
            "" => UNTITLED_TASK.to_string(),
            trimmed => trimmed.to_string(),
        };

        let record = TaskRecord {
            id: Uuid::new_v4(),
            raw: text.to_string(),
            title,
            time,
            location: self.locations.resolve(&lower).to_string(),
            category: self.categories.resolve(&lower).to_string(),
            status: TaskStatus::Todo,
            created_at,
        };
        debug!(
            "parsed task (id={}, time={:?}, location={}, category={})",
            record.id, record.time, record.location, record.category
        );
        record
    }
}

/// Parse with the default rules, stamping the current time.
pub fn parse_task(text: &str) -> TaskRecord {
    TaskParser::new().parse(text, Utc::now())
}
