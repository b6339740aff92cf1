//! Reminder scheduling.
//!
//! Every call to [`ReminderScheduler::schedule`] cancels the timers armed by
//! the previous call before arming new ones, so at most one timer per task is
//! ever live.

mod tokio_driver;

pub use tokio_driver::TokioTimerDriver;

use crate::format::{format_time, reminder_message};
use crate::sort::sort_refs;
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone};
use deskmate_protocol::{Notifier, TaskId, TaskRecord, TaskTime, TimerDriver, TimerHandle};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

/// Outcome of scheduling a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// No usable time; nothing armed.
    Flexible,
    /// A timer is armed for `fire_at`.
    Armed { fire_at: DateTime<Local> },
    /// `fire_at` is not in the future; nothing armed.
    Past { fire_at: DateTime<Local> },
}

/// Schedule line for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    pub task_id: TaskId,
    pub title: String,
    pub location: String,
    pub time: Option<TaskTime>,
    pub kind: ReminderKind,
    /// Text delivered if the timer fires.
    pub message: String,
}

impl ReminderEntry {
    /// Short schedule annotation.
    pub fn display_line(&self) -> String {
        match self.kind {
            ReminderKind::Flexible => "Flexible task, no fixed reminder.".to_string(),
            ReminderKind::Armed { .. } | ReminderKind::Past { .. } => {
                format!("Reminder set for {}", format_time(self.time))
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.kind, ReminderKind::Armed { .. })
    }
}

/// A live timer owned by the scheduler.
pub struct ArmedReminder {
    pub task_id: TaskId,
    pub fire_at: DateTime<Local>,
    handle: Box<dyn TimerHandle>,
}

impl ArmedReminder {
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }
}

impl fmt::Debug for ArmedReminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmedReminder")
            .field("task_id", &self.task_id)
            .field("fire_at", &self.fire_at)
            .field("active", &self.handle.is_active())
            .finish()
    }
}

/// Arms one reminder per future timed task through a [`TimerDriver`].
pub struct ReminderScheduler {
    driver: Arc<dyn TimerDriver>,
    armed: Vec<ArmedReminder>,
    entries: Vec<ReminderEntry>,
}

impl ReminderScheduler {
    pub fn new(driver: Arc<dyn TimerDriver>) -> Self {
        Self {
            driver,
            armed: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Cancel all previous timers, then arm reminders for `tasks` relative to `now`.
    ///
    /// Returns one entry per task in schedule order.
    pub fn schedule(&mut self, tasks: &[TaskRecord], now: DateTime<Local>) -> Vec<ReminderEntry> {
        self.cancel_all();

        let mut entries = Vec::with_capacity(tasks.len());
        for task in sort_refs(tasks) {
            let message = reminder_message(task);
            let kind = match task.time.and_then(|time| fire_time(&now, time)) {
                None => {
                    if task.time.is_some() {
                        warn!(
                            "task time out of range, treating as flexible (task_id={}, time={:?})",
                            task.id, task.time
                        );
                    }
                    ReminderKind::Flexible
                }
                Some(fire_at) => match (fire_at - now).to_std() {
                    Ok(delay) if !delay.is_zero() => {
                        let handle = self.driver.arm(delay, message.clone());
                        debug!(
                            "reminder armed (task_id={}, fire_at={}, delay_ms={})",
                            task.id,
                            fire_at,
                            delay.as_millis()
                        );
                        self.armed.push(ArmedReminder {
                            task_id: task.id,
                            fire_at,
                            handle,
                        });
                        ReminderKind::Armed { fire_at }
                    }
                    _ => ReminderKind::Past { fire_at },
                },
            };
            entries.push(ReminderEntry {
                task_id: task.id,
                title: task.title.clone(),
                location: task.location.clone(),
                time: task.time,
                kind,
                message,
            });
        }

        info!(
            "reminders scheduled (tasks={}, armed={})",
            entries.len(),
            self.armed.len()
        );
        self.entries = entries.clone();
        entries
    }

    /// Cancel every armed timer.
    pub fn cancel_all(&mut self) {
        if self.armed.is_empty() {
            return;
        }
        debug!("cancelling reminders (count={})", self.armed.len());
        for reminder in self.armed.drain(..) {
            reminder.handle.cancel();
        }
    }

    /// Timers still waiting to fire.
    pub fn active_count(&self) -> usize {
        self.armed.iter().filter(|reminder| reminder.is_active()).count()
    }

    /// Timers armed by the last call to [`Self::schedule`].
    pub fn armed(&self) -> &[ArmedReminder] {
        &self.armed
    }

    /// Entries produced by the last call to [`Self::schedule`].
    pub fn entries(&self) -> &[ReminderEntry] {
        &self.entries
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Instant for `time` on the same local day as `now`, in `now`'s zone.
///
/// A wall-clock time skipped by a DST gap moves forward one hour; an
/// ambiguous one resolves to the earlier instant.
fn fire_time<Tz: TimeZone>(now: &DateTime<Tz>, time: TaskTime) -> Option<DateTime<Tz>> {
    let naive = now
        .date_naive()
        .and_hms_opt(u32::from(time.hour), u32::from(time.minute), 0)?;
    let zone = now.timezone();
    resolve_local(&zone, naive).or_else(|| resolve_local(&zone, naive + Duration::hours(1)))
}

fn resolve_local<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Notifier that writes reminders to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::fire_time;
    use chrono::{Local, TimeZone, Timelike, Utc};
    use chrono_tz::America::New_York;
    use deskmate_protocol::TaskTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn fire_time_is_on_the_same_local_day() {
        let now = Local.with_ymd_and_hms(2026, 6, 10, 9, 0, 0).unwrap();
        let fire_at = fire_time(&now, TaskTime::new(15, 30).unwrap()).unwrap();
        assert_eq!(fire_at.date_naive(), now.date_naive());
        assert_eq!((fire_at.hour(), fire_at.minute(), fire_at.second()), (15, 30, 0));
    }

    #[test]
    fn time_in_a_dst_gap_moves_forward_an_hour() {
        let now = New_York.with_ymd_and_hms(2026, 3, 8, 0, 0, 0).unwrap();
        let fire_at = fire_time(&now, TaskTime::new(2, 30).unwrap()).unwrap();
        assert_eq!(fire_at.date_naive(), now.date_naive());
        assert_eq!((fire_at.hour(), fire_at.minute()), (3, 30));
        assert_eq!(
            fire_at.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()
        );
    }

    #[test]
    fn ambiguous_time_uses_the_earlier_instant() {
        let now = New_York.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let fire_at = fire_time(&now, TaskTime::new(1, 30).unwrap()).unwrap();
        assert_eq!((fire_at.hour(), fire_at.minute()), (1, 30));
        // 01:30 EDT, before the clocks fall back to EST.
        assert_eq!(
            fire_at.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn out_of_range_stored_time_has_no_fire_time() {
        let now = Local.with_ymd_and_hms(2026, 6, 10, 9, 0, 0).unwrap();
        let bogus = TaskTime {
            hour: 27,
            minute: 0,
        };
        assert_eq!(fire_time(&now, bogus), None);
    }
}
