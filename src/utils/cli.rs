//! Command-line definition for pfind.
//!
//! `pfind [OPTIONS] <PATTERN>` searches below `--dir` (default `.`) for entries whose name
//! matches PATTERN. Flags given here take precedence over `pfind.toml`.

use crate::config::Config;
use crate::core::{Dispatch, NamePattern, OutputMode, Search};
use crate::error::PfindError;
use crate::utils::clamp_channel_capacity;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pfind", version)]
#[command(about = "Parallel find")]
#[command(long_about = "Parallel find: prints every path below DIR whose name matches PATTERN.")]
#[command(after_help = "\
PATTERN is a shell glob matched against entry names, not full paths:
  *  ?  [abc]  [a-z]  [!x] or [^x]  \\* for a literal star

ENVIRONMENT:
  PFIND_CONFIG            Override the default config path
  RUST_LOG                Override the diagnostic log filter")]
pub struct Cli {
    /// Glob pattern matched against each entry name
    pub pattern: String,

    /// Root directory
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Append a dummy line number and type flags to each output line
    #[arg(short = 'n', long = "grepoutput")]
    pub grep_output: bool,

    /// Match names case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Worker threads (0 = one thread per directory)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Buffered matches between the walk and the output
    #[arg(long, value_name = "N")]
    pub channel_capacity: Option<usize>,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report fatal errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Resolve flags and config into a ready [Search].
    ///
    /// Fails only when the pattern does not compile, before anything is listed.
    pub fn into_search(self, config: &Config) -> Result<Search, PfindError> {
        let settings = config.search();

        let ignore_case = self.ignore_case || settings.ignore_case();
        let pattern = NamePattern::with_case(&self.pattern, ignore_case)?;

        let mode = OutputMode::from_grep_output(self.grep_output || settings.grep_output());
        let capacity = self
            .channel_capacity
            .map(clamp_channel_capacity)
            .unwrap_or(settings.channel_capacity());
        let threads = self.threads.unwrap_or(settings.threads());

        Ok(Search::new(self.dir, pattern)
            .output_mode(mode)
            .channel_capacity(capacity)
            .dispatch(Dispatch::from_threads(threads)))
    }
}
