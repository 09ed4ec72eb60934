//! Loading of `pfind.toml`.
//!
//! A missing file is normal and yields the defaults. A file that does not parse is
//! reported once on the diagnostic stream and also yields the defaults, so a broken
//! config never stops a search.

use crate::config::{SearchSection, SearchSettings};
use crate::error::PfindError;
use crate::utils::get_home;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw configuration as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    search: SearchSection,
}

/// Processed configuration used by pfind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    search: SearchSettings,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            search: raw.search.into(),
        }
    }
}

impl Config {
    /// Load from [Config::default_path], falling back to defaults.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!("no config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and parse a specific file. An unreadable file counts as empty.
    pub fn load_from(path: &Path) -> Result<Self, PfindError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("cannot read config {:?}: {}", path, e);
                return Ok(Self::default());
            }
        };
        Self::parse(&content).map_err(|source| PfindError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    #[inline]
    pub fn search(&self) -> &SearchSettings {
        &self.search
    }

    /// Determine the configuration file path.
    /// Checks the PFIND_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/pfind/pfind.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("PFIND_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("pfind/pfind.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/pfind/pfind.toml");
        }
        PathBuf::from("pfind.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_CHANNEL_CAPACITY;
    use std::error;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() -> Result<(), Box<dyn error::Error>> {
        let config = Config::parse("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.search().channel_capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.search().threads(), 0);
        assert!(!config.search().grep_output());
        Ok(())
    }

    #[test]
    fn search_table_is_read() -> Result<(), Box<dyn error::Error>> {
        let config = Config::parse(
            r#"
[search]
grep_output = true
ignore_case = true
channel_capacity = 8
threads = 4
"#,
        )?;
        let s = config.search();
        assert!(s.grep_output());
        assert!(s.ignore_case());
        assert_eq!(s.channel_capacity(), 8);
        assert_eq!(s.threads(), 4);
        Ok(())
    }

    #[test]
    fn capacity_is_clamped() -> Result<(), Box<dyn error::Error>> {
        let config = Config::parse("[search]\nchannel_capacity = 0\n")?;
        assert_eq!(config.search().channel_capacity(), 1);
        Ok(())
    }

    #[test]
    fn bad_file_is_an_error() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("pfind.toml");
        fs::write(&path, "[search]\nthreads = \"many\"\n")?;
        assert!(matches!(
            Config::load_from(&path),
            Err(PfindError::Config { .. })
        ));
        Ok(())
    }

    #[test]
    fn missing_file_gives_defaults() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let config = Config::load_from(&dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }
}
