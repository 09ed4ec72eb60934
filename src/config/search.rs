//! The `[search]` table of `pfind.toml`.
//!
//! [SearchSection] is deserialized as written by the user and turned into
//! [SearchSettings], with out of range values clamped.

use crate::core::DEFAULT_CHANNEL_CAPACITY;
use crate::utils::clamp_channel_capacity;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSection {
    grep_output: bool,
    ignore_case: bool,
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,
    threads: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        SearchSection {
            grep_output: false,
            ignore_case: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    grep_output: bool,
    ignore_case: bool,
    channel_capacity: usize,
    threads: usize,
}

impl From<SearchSection> for SearchSettings {
    fn from(s: SearchSection) -> Self {
        Self {
            grep_output: s.grep_output,
            ignore_case: s.ignore_case,
            channel_capacity: clamp_channel_capacity(s.channel_capacity),
            threads: s.threads,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSection::default().into()
    }
}

impl SearchSettings {
    #[inline]
    pub fn grep_output(&self) -> bool {
        self.grep_output
    }

    #[inline]
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    #[inline]
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Worker threads, `0` for one thread per directory.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }
}

/// Helper function for default channel_capacity
fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}
