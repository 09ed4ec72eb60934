//! Library crate for pfind.
//!
//! The shipped application is the `pfind` binary (`src/main.rs`).
//!
//! The search itself lives in [core]: build a [core::NamePattern], hand it with a root to
//! [core::Search] and call [core::Search::run] with any writer. Matches stream into the
//! writer while the tree is still being walked.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod utils;

pub use error::PfindError;
