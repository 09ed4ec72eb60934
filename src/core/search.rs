//! One complete search: drain, walk, close, wait.
//!
//! [Search] holds the resolved settings and [Search::run] performs the shutdown sequence
//! in the only order that loses nothing:
//! 1. the drain is started before any directory is listed,
//! 2. the walk runs until the pending count is zero,
//! 3. the last sender is dropped, closing the channel,
//! 4. the drain is waited for, so trailing output is written before returning.

use crate::core::drain::spawn_drain;
use crate::core::walker::{Dispatch, WalkStats, walk};
use crate::core::{NamePattern, OutputMode};
use crate::error::PfindError;

use crossbeam_channel::bounded;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default buffer of the result channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct Search {
    root: PathBuf,
    pattern: NamePattern,
    output_mode: OutputMode,
    channel_capacity: usize,
    dispatch: Dispatch,
}

/// What a finished search hands back.
#[derive(Debug)]
pub struct SearchReport<W> {
    pub sink: W,
    pub written: usize,
    pub stats: WalkStats,
}

impl Search {
    pub fn new(root: impl Into<PathBuf>, pattern: NamePattern) -> Self {
        Self {
            root: root.into(),
            pattern,
            output_mode: OutputMode::Plain,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            dispatch: Dispatch::Unbounded,
        }
    }

    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Zero is bumped to one: the drain needs somewhere to receive from.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    /// Run the search, writing every match to `sink`.
    pub fn run<W>(&self, sink: W) -> Result<SearchReport<W>, PfindError>
    where
        W: Write + Send + 'static,
    {
        let (tx, rx) = bounded(self.channel_capacity);
        let drain = spawn_drain(rx, self.output_mode, sink)?;

        let stats = walk(
            self.root.clone(),
            self.pattern.clone(),
            tx,
            self.dispatch,
        );

        let (sink, written) = drain.wait()?;
        Ok(SearchReport {
            sink,
            written,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn capacity_is_at_least_one() -> Result<(), Box<dyn std::error::Error>> {
        let search = Search::new(".", NamePattern::new("*")?).channel_capacity(0);
        assert_eq!(search.channel_capacity, 1);
        Ok(())
    }

    #[test]
    fn written_matches_stats() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        for i in 0..20 {
            let dir = tmp.path().join(format!("d{}", i));
            fs::create_dir(&dir)?;
            File::create(dir.join("hit.rs"))?;
            File::create(dir.join("miss.txt"))?;
        }

        let report = Search::new(tmp.path(), NamePattern::new("*.rs")?)
            .channel_capacity(1)
            .run(Vec::new())?;

        assert_eq!(report.written, 20);
        assert_eq!(report.stats.matches, 20);
        assert_eq!(report.stats.dirs_visited, 21);
        let text = String::from_utf8(report.sink)?;
        assert_eq!(text.lines().count(), 20);
        assert!(text.lines().all(|l| l.ends_with("hit.rs")));
        Ok(())
    }
}
