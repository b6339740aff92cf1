//! Public SDK surface for Deskmate.
//!
//! This crate re-exports the building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use deskmate_config as config;
pub use deskmate_core as core;
/// Re-export for convenience.
pub use deskmate_gateway as gateway;
/// Re-export for convenience.
pub use deskmate_protocol as protocol;
/// Re-export for convenience.
pub use deskmate_store as store;

#[inline]
/// Initialize logging using env_logger.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
