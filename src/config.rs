//! Runtime configuration, read from the environment.

use std::env;
use std::path::PathBuf;

use crate::store::DEFAULT_HIGH_SCORE_FILE;

/// Settings for the terminal game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the high score lives (`BLOCKFALL_HIGH_SCORE_FILE`)
    pub high_score_file: PathBuf,
    /// Fixed seed for piece draws (`BLOCKFALL_SEED`); random when unset
    pub seed: Option<u32>,
    /// Log file (`BLOCKFALL_LOG_PATH`); no logging when unset
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            seed: None,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank or unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let high_score_file = non_empty("BLOCKFALL_HIGH_SCORE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_FILE));

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        Self {
            high_score_file,
            seed,
            log_path,
        }
    }
}
