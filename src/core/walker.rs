//! The traversal engine for pfind.
//!
//! [walk] lists the root directory and fans out one concurrent visit per sub-directory it
//! finds, transitively. Each visit matches every entry name against the [NamePattern] and
//! publishes matches on the result channel as soon as they are found.
//!
//! Termination is decided by the [PendingCount] alone: a visit is added before it is
//! dispatched and marked done when it returns, so [walk] can block until the count hits
//! zero and then let go of its sender. Once the last sender is dropped the channel
//! disconnects and the drain finishes.
//!
//! Symlinks are reported when their name matches but are never descended into, whatever
//! they point at. This is what keeps the walk free of cycles.
//!
//! How visits are run is chosen with [Dispatch]:
//! - [Dispatch::Unbounded] spawns one thread per directory.
//! - [Dispatch::Pool] feeds a fixed set of worker threads through a queue.

use crate::core::{MatchResult, NamePattern, PendingCount};

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

/// How directory visits are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dispatch {
    /// One thread per discovered directory, no cap.
    #[default]
    Unbounded,
    /// A fixed number of worker threads pulling from a shared queue.
    Pool(usize),
}

impl Dispatch {
    /// `0` means no cap.
    pub fn from_threads(threads: usize) -> Self {
        match threads {
            0 => Dispatch::Unbounded,
            n => Dispatch::Pool(n),
        }
    }
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub dirs_visited: usize,
    pub dirs_failed: usize,
    pub matches: usize,
}

/// Messages for pool workers.
enum Job {
    Visit(PathBuf),
    Stop,
}

enum Spawner {
    Unbounded,
    Pool(Sender<Job>),
}

/// State shared by every visit of one walk.
struct Walker {
    pattern: NamePattern,
    results: Sender<MatchResult>,
    pending: PendingCount,
    spawner: Spawner,
    closed: AtomicBool,
    dirs_visited: AtomicUsize,
    dirs_failed: AtomicUsize,
    matches: AtomicUsize,
}

/// Walk the tree below `root`, sending every match on `results`.
///
/// Blocks until every directory has been listed. The root is listed on the calling
/// thread. The passed sender is dropped before returning; once the last visit thread has
/// also let go of it the channel is closed.
pub fn walk(
    root: PathBuf,
    pattern: NamePattern,
    results: Sender<MatchResult>,
    dispatch: Dispatch,
) -> WalkStats {
    let (spawner, workers) = match dispatch {
        Dispatch::Unbounded => (Spawner::Unbounded, None),
        Dispatch::Pool(n) => {
            let (job_tx, job_rx) = unbounded::<Job>();
            (Spawner::Pool(job_tx), Some((n.max(1), job_rx)))
        }
    };

    let walker = Arc::new(Walker {
        pattern,
        results,
        pending: PendingCount::new(),
        spawner,
        closed: AtomicBool::new(false),
        dirs_visited: AtomicUsize::new(0),
        dirs_failed: AtomicUsize::new(0),
        matches: AtomicUsize::new(0),
    });

    let pool = workers.map(|(n, job_rx)| start_pool(&walker, n, job_rx));

    tracing::debug!(
        "walking {} for {:?} ({:?})",
        root.display(),
        walker.pattern.as_str(),
        dispatch
    );

    walker.pending.add();
    walker.visit_and_finish(root);
    walker.pending.wait();

    if let Some(handles) = pool {
        walker.stop_pool(handles);
    }

    let stats = walker.stats();
    tracing::debug!(
        "walk finished: {} dirs, {} unreadable, {} matches",
        stats.dirs_visited,
        stats.dirs_failed,
        stats.matches
    );
    stats
}

impl Walker {
    /// List one directory. Matches are published, sub-directories dispatched.
    fn visit(self: &Arc<Self>, dir: &Path) {
        if self.closed.load(Ordering::Relaxed) {
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("read_dir {:?}: {}", dir, e);
                self.dirs_failed.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };
        self.dirs_visited.fetch_add(1, Ordering::Relaxed);

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("read_dir {:?}: {}", dir, e);
                    continue;
                }
            };
            let ft = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    tracing::warn!("file type of {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            let name = entry.file_name();
            let path = dir.join(&name);

            if self.pattern.matches(&name) {
                let res = MatchResult::from_file_type(path.clone(), ft);
                if !self.publish(res) {
                    return;
                }
            }

            if ft.is_symlink() {
                continue;
            }
            if ft.is_dir() {
                self.pending.add();
                self.dispatch(path);
            }
        }
    }

    /// Visit `dir`, then release its pending unit no matter how the visit went.
    fn visit_and_finish(self: &Arc<Self>, dir: PathBuf) {
        self.visit(&dir);
        self.pending.done();
    }

    /// Hand a directory off to run concurrently. Its pending unit is already counted.
    fn dispatch(self: &Arc<Self>, dir: PathBuf) {
        match &self.spawner {
            Spawner::Unbounded => {
                let walker = Arc::clone(self);
                let job_dir = dir.clone();
                let spawned = thread::Builder::new()
                    .name("pfind-visit".into())
                    .spawn(move || walker.visit_and_finish(job_dir));
                if let Err(e) = spawned {
                    tracing::warn!("cannot spawn visit for {:?}, listing inline: {}", dir, e);
                    self.visit_and_finish(dir);
                }
            }
            Spawner::Pool(jobs) => {
                if let Err(err) = jobs.send(Job::Visit(dir)) {
                    let Job::Visit(dir) = err.into_inner() else {
                        return;
                    };
                    self.visit_and_finish(dir);
                }
            }
        }
    }

    /// Send a match to the drain. Returns false once the drain is gone.
    fn publish(&self, res: MatchResult) -> bool {
        match self.results.send(res) {
            Ok(()) => {
                self.matches.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(err) => {
                if !self.closed.swap(true, Ordering::Relaxed) {
                    tracing::debug!(
                        "result channel closed, dropping {}",
                        err.into_inner().path().display()
                    );
                }
                false
            }
        }
    }

    fn stop_pool(&self, handles: Vec<JoinHandle<()>>) {
        if let Spawner::Pool(jobs) = &self.spawner {
            for _ in 0..handles.len() {
                let _ = jobs.send(Job::Stop);
            }
        }
        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("pool worker panicked");
            }
        }
    }

    fn stats(&self) -> WalkStats {
        WalkStats {
            dirs_visited: self.dirs_visited.load(Ordering::Relaxed),
            dirs_failed: self.dirs_failed.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
        }
    }
}

/// Start `n` pool workers. A worker that cannot be started is skipped; if none start,
/// the queue has no consumer and every dispatch falls back to an inline visit.
fn start_pool(walker: &Arc<Walker>, n: usize, job_rx: Receiver<Job>) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        let walker = Arc::clone(walker);
        let job_rx = job_rx.clone();
        let spawned = thread::Builder::new()
            .name(format!("pfind-worker-{}", i))
            .spawn(move || {
                while let Ok(Job::Visit(dir)) = job_rx.recv() {
                    walker.visit_and_finish(dir);
                }
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => tracing::warn!("cannot spawn pool worker {}: {}", i, e),
        }
    }
    handles
}
