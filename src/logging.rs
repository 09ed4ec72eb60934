//! Diagnostic logging for pfind.
//!
//! Everything goes to stderr so that diagnostics never mix with match output on stdout.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Map the `-q`/`-v` flags onto a level. Quiet wins over verbose.
pub fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    if quiet {
        return tracing::Level::ERROR;
    }
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initialize the stderr subscriber. `RUST_LOG` overrides the given level.
pub fn init_logging(level: tracing::Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_for(2, true), tracing::Level::ERROR);
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(level_for(0, false), tracing::Level::WARN);
        assert_eq!(level_for(1, false), tracing::Level::DEBUG);
        assert_eq!(level_for(5, false), tracing::Level::TRACE);
    }
}
