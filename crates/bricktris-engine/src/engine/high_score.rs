use std::{io, num::ParseIntError};

/// Default name of the text record the high score is kept in.
pub const HIGH_SCORE_FILE: &str = "high_score.txt";

/// Failure of a high score store.
///
/// The session recovers from these locally: a failed load counts as a high
/// score of 0 and a failed save is skipped.
#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum HighScoreError {
    #[display("high score record could not be accessed: {_0}")]
    Io(io::Error),
    #[display("high score record is not a number: {_0}")]
    Parse(ParseIntError),
}

/// Durable storage for the high score.
///
/// The engine never touches storage itself; the embedding program supplies an
/// implementation (a text file, a settings service, ...).
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> Result<u64, HighScoreError>;
    fn save_high_score(&mut self, high_score: u64) -> Result<(), HighScoreError>;
}

/// Store that keeps the high score in memory only.
///
/// # Example
///
/// ```
/// use bricktris_engine::{HighScoreStore, MemoryHighScoreStore};
///
/// let mut store = MemoryHighScoreStore::new(120);
/// assert_eq!(store.load_high_score().unwrap(), 120);
/// store.save_high_score(300).unwrap();
/// assert_eq!(store.high_score(), 300);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHighScoreStore {
    high_score: u64,
    saves: usize,
}

impl MemoryHighScoreStore {
    #[must_use]
    pub const fn new(high_score: u64) -> Self {
        Self {
            high_score,
            saves: 0,
        }
    }

    #[must_use]
    pub const fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Number of times [`HighScoreStore::save_high_score`] was called.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> Result<u64, HighScoreError> {
        Ok(self.high_score)
    }

    fn save_high_score(&mut self, high_score: u64) -> Result<(), HighScoreError> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}
