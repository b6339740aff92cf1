//! Reminder scheduling against a manual clock and timer driver.

use chrono::Duration;
use deskmate_core::{ReminderKind, ReminderScheduler, parse_task};
use deskmate_protocol::{Clock, TaskTime};
use deskmate_test_utils::{ManualClock, ManualTimerDriver, RecordingNotifier};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn fixture() -> (Arc<ManualClock>, Arc<ManualTimerDriver>, ReminderScheduler) {
    let clock = Arc::new(ManualClock::at_local(2026, 6, 10, 9, 0));
    let driver = Arc::new(ManualTimerDriver::new(
        clock.clone(),
        Arc::new(RecordingNotifier::default()),
    ));
    let scheduler = ReminderScheduler::new(driver.clone());
    (clock, driver, scheduler)
}

#[test]
fn future_task_fires_once_with_message() {
    let (clock, driver, mut scheduler) = fixture();
    let tasks = vec![parse_task("Client call at 3pm in conference room")];

    let entries = scheduler.schedule(&tasks, clock.now());
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_armed());
    assert_eq!(entries[0].display_line(), "Reminder set for 03:00 PM");
    assert_eq!(scheduler.active_count(), 1);

    assert_eq!(driver.advance(Duration::hours(5)), 0);
    assert_eq!(driver.advance(Duration::hours(1)), 1);
    assert_eq!(driver.advance(Duration::hours(1)), 0);
    assert_eq!(
        driver.notifier().messages(),
        vec!["Reminder: Client call at  in conference room at 03:00 PM (Conference Room)"]
    );
    assert_eq!(scheduler.active_count(), 0);
}

#[test]
fn past_and_current_times_arm_nothing() {
    let (clock, driver, mut scheduler) = fixture();
    let tasks = vec![parse_task("standup 8am"), parse_task("now 9:00")];

    let entries = scheduler.schedule(&tasks, clock.now());
    assert!(
        entries
            .iter()
            .all(|entry| matches!(entry.kind, ReminderKind::Past { .. }))
    );
    assert_eq!(driver.armed_total(), 0);
    assert_eq!(entries[0].display_line(), "Reminder set for 08:00 AM");
}

#[test]
fn untimed_tasks_are_flexible() {
    let (clock, driver, mut scheduler) = fixture();
    let entries = scheduler.schedule(&[parse_task("buy stationery")], clock.now());
    assert_eq!(entries[0].kind, ReminderKind::Flexible);
    assert_eq!(entries[0].display_line(), "Flexible task, no fixed reminder.");
    assert_eq!(driver.armed_total(), 0);
}

#[test]
fn rescheduling_replaces_previous_timers() {
    let (clock, driver, mut scheduler) = fixture();
    let tasks = vec![parse_task("review 2pm"), parse_task("sync 4pm")];

    scheduler.schedule(&tasks, clock.now());
    scheduler.schedule(&tasks, clock.now());
    assert_eq!(driver.armed_total(), 4);
    assert_eq!(driver.active_count(), 2);

    driver.advance(Duration::hours(12));
    assert_eq!(driver.notifier().messages().len(), 2);
}

#[test]
fn entries_follow_schedule_order() {
    let (clock, _driver, mut scheduler) = fixture();
    let tasks = vec![
        parse_task("errands"),
        parse_task("late 6pm"),
        parse_task("early 10am"),
    ];
    let titles: Vec<String> = scheduler
        .schedule(&tasks, clock.now())
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, vec!["early", "late", "errands"]);
}

#[test]
fn dropping_the_scheduler_cancels_timers() {
    let (clock, driver, mut scheduler) = fixture();
    scheduler.schedule(&[parse_task("demo 5pm")], clock.now());
    assert_eq!(driver.active_count(), 1);
    drop(scheduler);
    assert_eq!(driver.active_count(), 0);
    assert_eq!(driver.advance(Duration::hours(10)), 0);
}

#[test]
fn stored_out_of_range_time_is_flexible() {
    let (clock, driver, mut scheduler) = fixture();
    let mut task = parse_task("imported sync");
    task.time = Some(TaskTime {
        hour: 27,
        minute: 0,
    });

    let entries = scheduler.schedule(&[task], clock.now());
    assert_eq!(entries[0].kind, ReminderKind::Flexible);
    assert_eq!(scheduler.active_count(), 0);
    assert_eq!(driver.armed_total(), 0);
}
