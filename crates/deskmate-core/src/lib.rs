//! Core task handling for Deskmate.
//!
//! This crate owns the heuristic task parser, schedule ordering, the status
//! board, the reminder scheduler and the [`Assistant`] coordinator that ties
//! them to the store and the chat gateway.

pub mod assistant;
pub mod board;
pub mod error;
pub mod format;
pub mod parser;
pub mod rules;
pub mod scheduler;
pub mod sort;

pub use assistant::{Assistant, AssistantBuilder, MISSING_CREDENTIAL_MESSAGE};
pub use board::StatusBoard;
pub use error::AssistantError;
pub use format::{format_time, reminder_message};
pub use parser::{TaskParser, UNTITLED_TASK, parse_task};
pub use rules::{CATEGORY_RULES, KeywordRule, LOCATION_RULES, RuleTable, TimeMatch, TimeMatcher};
pub use scheduler::{
    ArmedReminder, LogNotifier, ReminderEntry, ReminderKind, ReminderScheduler, TokioTimerDriver,
};
pub use sort::{compare_tasks, sort_refs, sort_tasks};
