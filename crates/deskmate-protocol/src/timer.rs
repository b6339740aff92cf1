//! Clock, timer and notification seams used by the reminder scheduler.

use chrono::{DateTime, Local};
use std::time::Duration;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current instant in the local timezone.
    fn now(&self) -> DateTime<Local>;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Surface that delivers reminder messages to the user.
pub trait Notifier: Send + Sync {
    /// Deliver a message.
    fn notify(&self, message: &str);
}

/// Handle for a single armed one-shot timer.
pub trait TimerHandle: Send + Sync {
    /// Cancel the timer. Cancelling an already fired or cancelled timer is a no-op.
    fn cancel(&self);
    /// Whether the timer is still waiting to fire.
    fn is_active(&self) -> bool;
}

/// Arms one-shot timers that deliver a message when they elapse.
pub trait TimerDriver: Send + Sync {
    /// Arm a timer that fires once after `delay` and delivers `message`.
    fn arm(&self, delay: Duration, message: String) -> Box<dyn TimerHandle>;
}
