//! Core search engine for pfind.
//!
//! This module contains the pieces of a search:
//! - [pattern]: the shell glob applied to entry names (see [NamePattern]).
//! - [entry]: the [MatchResult] sent for every match.
//! - [pending]: the [PendingCount] that tells when the walk is over.
//! - [walker]: directory traversal and the fan-out of one visit per directory.
//! - [formatter]: plain and annotated match lines.
//! - [drain]: the thread that writes matches out.
//! - [search]: [Search], which runs all of the above in order.
//!
//! Most callers only need [Search] and [NamePattern].

pub mod drain;
pub mod entry;
pub mod formatter;
pub mod pattern;
pub mod pending;
pub mod search;
pub mod walker;

pub use entry::MatchResult;
pub use formatter::{OutputMode, mode_string, write_line};
pub use pattern::NamePattern;
pub use pending::PendingCount;
pub use search::{DEFAULT_CHANNEL_CAPACITY, Search, SearchReport};
pub use walker::{Dispatch, WalkStats, walk};
