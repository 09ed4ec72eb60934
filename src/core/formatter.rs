//! Rendering of match lines.
//!
//! Two output modes exist and one is chosen at startup:
//! - [OutputMode::Plain] prints the path alone.
//! - [OutputMode::Annotated] prints `path:1: <flags>`, a grep-like line that editors and
//!   other line based tools can jump to. The flags are built by [mode_string].

use crate::core::MatchResult;

use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Plain,
    Annotated,
}

impl OutputMode {
    pub fn from_grep_output(grep_output: bool) -> Self {
        if grep_output {
            OutputMode::Annotated
        } else {
            OutputMode::Plain
        }
    }
}

/// Short type code for a match: `d` for a directory, then `S` for a symlink.
pub fn mode_string(res: &MatchResult) -> String {
    let mut buf = String::with_capacity(2);
    if res.is_dir() {
        buf.push('d');
    }
    if res.is_symlink() {
        buf.push('S');
    }
    buf
}

/// Write one full line, newline included, for `res`.
pub fn write_line<W: Write + ?Sized>(
    out: &mut W,
    res: &MatchResult,
    mode: OutputMode,
) -> io::Result<()> {
    write_path(out, res.path())?;
    if mode == OutputMode::Annotated {
        write!(out, ":1: {}", mode_string(res))?;
    }
    out.write_all(b"\n")
}

/// Paths go out byte for byte on unix.
fn write_path<W: Write + ?Sized>(out: &mut W, path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        out.write_all(path.as_os_str().as_bytes())
    }
    #[cfg(not(unix))]
    {
        write!(out, "{}", path.display())
    }
}
