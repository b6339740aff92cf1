//! Schedule ordering.

use deskmate_protocol::TaskRecord;
use std::cmp::Ordering;

/// Timed tasks by minutes since midnight, untimed tasks last.
///
/// Two untimed tasks compare equal so a stable sort keeps their input order.
pub fn compare_tasks(left: &TaskRecord, right: &TaskRecord) -> Ordering {
    match (left.time, right.time) {
        (Some(left), Some(right)) => left.minutes_of_day().cmp(&right.minutes_of_day()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorted copy of `tasks`; the input is left untouched.
pub fn sort_tasks(tasks: &[TaskRecord]) -> Vec<TaskRecord> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(compare_tasks);
    sorted
}

/// Same ordering as [`sort_tasks`] over borrowed records.
pub fn sort_refs<'a, I>(tasks: I) -> Vec<&'a TaskRecord>
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut sorted: Vec<&TaskRecord> = tasks.into_iter().collect();
    sorted.sort_by(|left, right| compare_tasks(left, right));
    sorted
}
