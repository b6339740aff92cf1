//! Display formatting shared by the scheduler, the assistant and the CLI.

use chrono::NaiveTime;
use deskmate_protocol::{TaskRecord, TaskTime};

/// Label shown for tasks without a usable time.
pub const FLEXIBLE_LABEL: &str = "Flexible";

/// Two-digit 12-hour clock (`"03:00 PM"`), or `"Flexible"` when absent.
pub fn format_time(time: Option<TaskTime>) -> String {
    time.and_then(|time| {
        NaiveTime::from_hms_opt(u32::from(time.hour), u32::from(time.minute), 0)
    })
    .map_or_else(
        || FLEXIBLE_LABEL.to_string(),
        |time| time.format("%I:%M %p").to_string(),
    )
}

/// Notification text delivered when a task's reminder fires.
pub fn reminder_message(task: &TaskRecord) -> String {
    format!(
        "Reminder: {} at {} ({})",
        task.title,
        format_time(task.time),
        task.location
    )
}

#[cfg(test)]
mod tests {
    use super::{format_time, reminder_message};
    use crate::parser::parse_task;
    use deskmate_protocol::TaskTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_time(TaskTime::new(15, 0)), "03:00 PM");
        assert_eq!(format_time(TaskTime::new(0, 5)), "12:05 AM");
        assert_eq!(format_time(TaskTime::new(12, 30)), "12:30 PM");
        assert_eq!(format_time(None), "Flexible");
    }

    #[test]
    fn reminder_text() {
        let task = parse_task("Client call at 3pm in conference room");
        assert_eq!(
            reminder_message(&task),
            "Reminder: Client call at  in conference room at 03:00 PM (Conference Room)"
        );
    }
}
