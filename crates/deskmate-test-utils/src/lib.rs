//! Test helpers shared across Deskmate crates.

pub mod clock;
pub mod gateway;
pub mod timer;

pub use clock::ManualClock;
pub use gateway::{FailingGateway, FixedGateway, RecordedCall};
pub use timer::{ManualTimerDriver, RecordingNotifier};
