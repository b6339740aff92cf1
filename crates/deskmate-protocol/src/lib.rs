//! Shared record types and scheduling seams for Deskmate.
//!
//! Every other crate in the workspace speaks in terms of these types: the
//! parser produces [`TaskRecord`]s, the store persists them, the gateway
//! serializes them as chat context and the scheduler arms reminders for them
//! through the [`TimerDriver`] seam.

mod client;
mod task;
mod timer;

pub use client::{BLANK_FIELD, ClientDraft, ClientRecord};
pub use task::{ParseStatusError, TaskId, TaskRecord, TaskStatus, TaskTime};
pub use timer::{Clock, Notifier, SystemClock, TimerDriver, TimerHandle};
