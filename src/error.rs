//! Error type for pfind.
//!
//! Only fatal conditions end up here. A directory that cannot be listed is not an error
//! for the run as a whole: the walker logs it and moves on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PfindError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid pattern {pattern:?}: trailing backslash")]
    TrailingEscape { pattern: String },

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("failed to start thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("result drain thread panicked")]
    DrainPanicked,

    #[error("failed to parse config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl PfindError {
    /// Errors caused by what the user typed, as opposed to I/O trouble during a run.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            PfindError::InvalidPattern { .. } | PfindError::TrailingEscape { .. }
        )
    }
}
