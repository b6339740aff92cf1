use chrono::{DateTime, Duration, Local, TimeZone};
use deskmate_protocol::Clock;
use parking_lot::Mutex;

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock set to a local wall-clock time (earliest instant when ambiguous).
    ///
    /// Panics if the time does not exist in the local timezone.
    pub fn at_local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let now = Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .earliest()
            .expect("valid local time");
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) -> DateTime<Local> {
        let mut now = self.now.lock();
        *now += by;
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock()
    }
}
