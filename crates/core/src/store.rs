//! Persistence interface for the high score.
//!
//! The engine reads the stored value once when it is built and writes it back
//! inline every time the running score beats it. Reading never fails: a
//! missing or unreadable value is simply "no high score yet".

use thiserror::Error;

/// Errors raised while persisting a high score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("high score store is unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of the high score.
pub trait HighScoreStore {
    /// Stored high score, or 0 if there is none or it cannot be read.
    fn load(&self) -> u32;

    /// Overwrite the stored high score.
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

/// In-memory store for headless runs and tests.
///
/// Keeps every saved value so callers can check how often the engine wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: Vec<u32>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `score`
    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }

    /// Store whose writes always fail (reads keep working)
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Every value passed to a successful `save`, oldest first
    pub fn saves(&self) -> &[u32] {
        &self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        self.value = Some(score);
        self.saves.push(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_zero() {
        assert_eq!(MemoryStore::new().load(), 0);
    }

    #[test]
    fn test_load_after_save_returns_saved_value() {
        let mut store = MemoryStore::new();
        store.save(120).unwrap();
        assert_eq!(store.load(), 120);
        assert_eq!(store.saves(), &[120]);
    }

    #[test]
    fn test_failing_store_keeps_old_value() {
        let mut store = MemoryStore::failing();
        assert!(store.save(50).is_err());
        assert_eq!(store.load(), 0);
        assert!(store.saves().is_empty());
    }
}
