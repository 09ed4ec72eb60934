//! The result drain.
//!
//! A single thread owns the receiving end of the result channel and writes every
//! [MatchResult] to the sink in the order it arrives. It stops when the channel is closed,
//! which only happens once every sender is gone, and hands the sink back through
//! [DrainHandle::wait].
//!
//! If the sink breaks, the drain stops and drops its receiver. Producers then see a closed
//! channel instead of blocking on a full one.

use crate::core::MatchResult;
use crate::core::formatter::{OutputMode, write_line};
use crate::error::PfindError;

use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};

/// Completion handle for a running drain.
pub struct DrainHandle<W> {
    handle: JoinHandle<DrainOutcome<W>>,
}

struct DrainOutcome<W> {
    sink: W,
    written: usize,
    error: Option<io::Error>,
}

/// Start the drain thread. Must be running before any producer starts sending.
pub fn spawn_drain<W>(
    rx: Receiver<MatchResult>,
    mode: OutputMode,
    sink: W,
) -> Result<DrainHandle<W>, PfindError>
where
    W: Write + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("pfind-drain".into())
        .spawn(move || drain(rx, mode, sink))
        .map_err(PfindError::Spawn)?;
    Ok(DrainHandle { handle })
}

impl<W> DrainHandle<W> {
    /// Block until the channel has been closed and fully consumed.
    ///
    /// Returns the sink and the number of lines written. A closed pipe on the other end is
    /// not an error: whoever reads the output has simply stopped reading.
    pub fn wait(self) -> Result<(W, usize), PfindError> {
        let outcome = self.handle.join().map_err(|_| PfindError::DrainPanicked)?;
        match outcome.error {
            Some(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(PfindError::Output(e)),
            _ => Ok((outcome.sink, outcome.written)),
        }
    }
}

fn drain<W: Write>(rx: Receiver<MatchResult>, mode: OutputMode, mut sink: W) -> DrainOutcome<W> {
    let mut written = 0usize;

    for res in rx.iter() {
        // Flush once the backlog is written, not per line.
        let flushed = write_line(&mut sink, &res, mode).and_then(|_| {
            if rx.is_empty() {
                sink.flush()
            } else {
                Ok(())
            }
        });
        if let Err(e) = flushed {
            if e.kind() == io::ErrorKind::BrokenPipe {
                tracing::debug!("output closed after {} lines", written);
            } else {
                tracing::error!("write failed for {}: {}", res.path().display(), e);
            }
            return DrainOutcome {
                sink,
                written,
                error: Some(e),
            };
        }
        written += 1;
    }

    DrainOutcome {
        sink,
        written,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::path::PathBuf;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingSink {
        data: Vec<u8>,
        flushes: usize,
    }

    impl Write for CountingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    struct Failing;

    impl Write for Failing {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn drains_in_channel_order() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx) = bounded(2);
        let handle = spawn_drain(rx, OutputMode::Plain, Vec::new())?;
        for name in ["a", "b", "c", "d"] {
            tx.send(MatchResult::new(PathBuf::from(name), 0))?;
        }
        drop(tx);

        let (out, written) = handle.wait()?;
        assert_eq!(written, 4);
        assert_eq!(String::from_utf8(out)?, "a\nb\nc\nd\n");
        Ok(())
    }

    #[test]
    fn flushes_once_per_backlog() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx) = bounded(8);
        for name in ["a", "b", "c", "d"] {
            tx.send(MatchResult::new(PathBuf::from(name), 0))?;
        }
        drop(tx);

        let handle = spawn_drain(rx, OutputMode::Plain, CountingSink::default())?;
        let (sink, written) = handle.wait()?;
        assert_eq!(written, 4);
        assert_eq!(sink.flushes, 1);
        assert_eq!(String::from_utf8(sink.data)?, "a\nb\nc\nd\n");
        Ok(())
    }

    #[test]
    fn annotated_mode() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx) = bounded(4);
        let handle = spawn_drain(rx, OutputMode::Annotated, Vec::new())?;
        tx.send(MatchResult::new(PathBuf::from("/a/sub"), MatchResult::IS_DIR))?;
        drop(tx);

        let (out, _) = handle.wait()?;
        assert_eq!(String::from_utf8(out)?, "/a/sub:1: d\n");
        Ok(())
    }

    #[test]
    fn broken_pipe_releases_producers() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx) = bounded(1);
        let handle = spawn_drain(rx, OutputMode::Plain, ClosedPipe)?;

        let mut refused = false;
        for i in 0..64 {
            if tx.send(MatchResult::new(PathBuf::from(i.to_string()), 0)).is_err() {
                refused = true;
                break;
            }
        }
        assert!(refused);
        drop(tx);

        let (_, written) = handle.wait()?;
        assert_eq!(written, 0);
        Ok(())
    }

    #[test]
    fn other_write_errors_are_reported() -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx) = bounded(1);
        let handle = spawn_drain(rx, OutputMode::Plain, Failing)?;
        let _ = tx.send(MatchResult::new(PathBuf::from("x"), 0));
        drop(tx);

        assert!(matches!(handle.wait(), Err(PfindError::Output(_))));
        Ok(())
    }
}
