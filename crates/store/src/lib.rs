//! File-backed high-score store.
//!
//! The file holds nothing but the score as decimal digits. A missing,
//! unreadable or malformed file reads as 0; writes replace the whole file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use blockfall_core::store::{HighScoreStore, StoreError};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.txt";

/// High score kept in a plain text file.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored high score");
                return 0;
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read high score");
                return 0;
            }
        };

        match parse_score(&text) {
            Some(score) => score,
            None => {
                warn!(path = %self.path.display(), "ignoring malformed high score");
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        debug!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}

/// Parse the stored text: a decimal integer, surrounding whitespace allowed.
pub fn parse_score(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Unique scratch path under the system temp dir, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            static COUNTER: AtomicUsize = AtomicUsize::new(0);
            let n = COUNTER.fetch_add(1, Ordering::SeqCst);
            let path = std::env::temp_dir().join(format!(
                "blockfall-store-{}-{}-{}",
                std::process::id(),
                n,
                name
            ));
            let _ = fs::remove_file(&path);
            Self(path)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    #[test]
    fn missing_file_loads_zero() {
        let scratch = Scratch::new("missing");
        let store = FileHighScoreStore::new(&scratch.0);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn load_after_save_returns_value() {
        let scratch = Scratch::new("roundtrip");
        let mut store = FileHighScoreStore::new(&scratch.0);
        store.save(130).unwrap();
        assert_eq!(store.load(), 130);

        // A second store over the same file sees it too
        assert_eq!(FileHighScoreStore::new(&scratch.0).load(), 130);
    }

    #[test]
    fn save_writes_bare_digits() {
        let scratch = Scratch::new("format");
        let mut store = FileHighScoreStore::new(&scratch.0);
        store.save(40).unwrap();
        store.save(1200).unwrap();
        assert_eq!(fs::read_to_string(&scratch.0).unwrap(), "1200");
    }

    #[test]
    fn malformed_file_loads_zero() {
        let scratch = Scratch::new("malformed");
        fs::write(&scratch.0, "not a number").unwrap();
        assert_eq!(FileHighScoreStore::new(&scratch.0).load(), 0);

        fs::write(&scratch.0, "").unwrap();
        assert_eq!(FileHighScoreStore::new(&scratch.0).load(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let scratch = Scratch::new("whitespace");
        fs::write(&scratch.0, " 250\n").unwrap();
        assert_eq!(FileHighScoreStore::new(&scratch.0).load(), 250);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let scratch = Scratch::new("dir");
        let mut store = FileHighScoreStore::new(scratch.0.join("nested").join("score.txt"));
        let err = store.save(10).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn parse_score_rejects_negative_and_garbage() {
        assert_eq!(parse_score("42"), Some(42));
        assert_eq!(parse_score("-5"), None);
        assert_eq!(parse_score("4 2"), None);
    }
}
