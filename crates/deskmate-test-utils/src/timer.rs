use crate::clock::ManualClock;
use chrono::{DateTime, Duration, Local};
use deskmate_protocol::{Clock, Notifier, TimerDriver, TimerHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Notifier that keeps every delivered message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug)]
struct ManualTimer {
    due: DateTime<Local>,
    message: String,
    state: AtomicU8,
}

struct ManualTimerHandle {
    timer: Arc<ManualTimer>,
}

impl TimerHandle for ManualTimerHandle {
    fn cancel(&self) {
        let _ = self.timer.state.compare_exchange(
            PENDING,
            CANCELLED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }

    fn is_active(&self) -> bool {
        self.timer.state.load(Ordering::SeqCst) == PENDING
    }
}

/// Timer driver advanced by hand against a [`ManualClock`].
///
/// Due timers fire exactly once, in due order, when the clock is advanced.
pub struct ManualTimerDriver {
    clock: Arc<ManualClock>,
    notifier: Arc<RecordingNotifier>,
    timers: Mutex<Vec<Arc<ManualTimer>>>,
}

impl ManualTimerDriver {
    pub fn new(clock: Arc<ManualClock>, notifier: Arc<RecordingNotifier>) -> Self {
        Self {
            clock,
            notifier,
            timers: Mutex::new(Vec::new()),
        }
    }

    pub fn notifier(&self) -> &Arc<RecordingNotifier> {
        &self.notifier
    }

    /// Move the clock forward and fire every timer now due.
    pub fn advance(&self, by: Duration) -> usize {
        self.clock.advance(by);
        self.fire_due()
    }

    /// Set the clock and fire every timer now due.
    pub fn advance_to(&self, now: DateTime<Local>) -> usize {
        self.clock.set(now);
        self.fire_due()
    }

    /// Fire pending timers whose due time has passed. Returns how many fired.
    pub fn fire_due(&self) -> usize {
        let now = self.clock.now();
        let mut due: Vec<Arc<ManualTimer>> = self
            .timers
            .lock()
            .iter()
            .filter(|timer| timer.due <= now && timer.state.load(Ordering::SeqCst) == PENDING)
            .cloned()
            .collect();
        due.sort_by_key(|timer| timer.due);
        let mut fired = 0;
        for timer in due {
            if timer
                .state
                .compare_exchange(PENDING, FIRED, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                self.notifier.notify(&timer.message);
                fired += 1;
            }
        }
        fired
    }

    /// Timers still pending.
    pub fn active_count(&self) -> usize {
        self.timers
            .lock()
            .iter()
            .filter(|timer| timer.state.load(Ordering::SeqCst) == PENDING)
            .count()
    }

    /// Every timer ever armed, including fired and cancelled ones.
    pub fn armed_total(&self) -> usize {
        self.timers.lock().len()
    }

    /// Due instants of the pending timers.
    pub fn pending_due(&self) -> Vec<DateTime<Local>> {
        self.timers
            .lock()
            .iter()
            .filter(|timer| timer.state.load(Ordering::SeqCst) == PENDING)
            .map(|timer| timer.due)
            .collect()
    }
}

impl TimerDriver for ManualTimerDriver {
    fn arm(&self, delay: std::time::Duration, message: String) -> Box<dyn TimerHandle> {
        let delay = Duration::from_std(delay).unwrap_or_else(|_| Duration::days(365));
        let due = self.clock.now() + delay;
        let timer = Arc::new(ManualTimer {
            due,
            message,
            state: AtomicU8::new(PENDING),
        });
        self.timers.lock().push(timer.clone());
        Box::new(ManualTimerHandle { timer })
    }
}
