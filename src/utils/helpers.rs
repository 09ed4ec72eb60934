//! Helpers for pfind.
//!
//! Bounds for the result channel buffer and the home directory lookup used to find the
//! config file.

use std::path::PathBuf;

/// The smallest result buffer. A zero sized channel would turn every match into a rendezvous.
pub const MIN_CHANNEL_CAPACITY: usize = 1;
/// The largest result buffer accepted from the config.
pub const MAX_CHANNEL_CAPACITY: usize = 65536;

/// Get the user's home directory.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Clamp the channel capacity into [MIN_CHANNEL_CAPACITY]..=[MAX_CHANNEL_CAPACITY],
/// warning when the configured value was out of range.
pub fn clamp_channel_capacity(value: usize) -> usize {
    let clamped = value.clamp(MIN_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY);
    if clamped != value {
        tracing::warn!(
            "channel_capacity={} out of range ({}..={}), clamped to {}",
            value,
            MIN_CHANNEL_CAPACITY,
            MAX_CHANNEL_CAPACITY,
            clamped
        );
    }
    clamped
}
