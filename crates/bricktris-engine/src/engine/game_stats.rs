use serde::Serialize;

/// Points awarded for clearing lines with a single attach.
///
/// Index corresponds to the number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 700 points
/// - 4 lines: 1500 points
pub const SCORE_TABLE: [u64; 5] = [0, 100, 300, 700, 1500];

/// Score needed to advance one level.
pub const LEVEL_SCORE_THRESHOLD: u64 = 600;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 10;
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;

/// Score, high score, level and speed of one game.
///
/// - **Score**: sum of [`SCORE_TABLE`] entries for every attach
/// - **Level**: `1 + score / LEVEL_SCORE_THRESHOLD`, clamped to `1..=10`
/// - **Speed**: follows the level, clamped to `1..=10`
/// - **High score**: raised to the score whenever the score passes it
///
/// All counters only grow during a game; [`GameStats::reset`] starts a new
/// game while keeping the high score.
///
/// # Example
///
/// ```
/// use bricktris_engine::GameStats;
///
/// let mut stats = GameStats::new(0);
/// stats.complete_attach(4); // four lines at once
///
/// assert_eq!(stats.score(), 1500);
/// assert_eq!(stats.level(), 3);
/// assert_eq!(stats.high_score(), 1500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u64,
    high_score: u64,
    level: u32,
    speed: u32,
    total_cleared_lines: u64,
    line_cleared_counter: [u64; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameStats {
    /// Creates a fresh tracker seeded with a previously stored high score.
    #[must_use]
    pub const fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            level: MIN_LEVEL,
            speed: MIN_SPEED,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn high_score(&self) -> u64 {
        self.high_score
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> u64 {
        self.total_cleared_lines
    }

    /// Histogram of attaches by number of lines cleared (`[0]` counts attaches
    /// that cleared nothing).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[u64; 5] {
        &self.line_cleared_counter
    }

    /// Starts a new game: zeroes score and progression, keeps the high score.
    pub const fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }

    /// Updates the counters after a piece was attached.
    ///
    /// Returns `true` when this pushed the score past the high score.
    pub fn complete_attach(&mut self, cleared_lines: usize) -> bool {
        let bucket = cleared_lines.min(SCORE_TABLE.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        self.total_cleared_lines += cleared_lines as u64;
        self.score += SCORE_TABLE[bucket];

        let level = self.score / LEVEL_SCORE_THRESHOLD + u64::from(MIN_LEVEL);
        let level = u32::try_from(level).unwrap_or(MAX_LEVEL).min(MAX_LEVEL);
        self.level = self.level.max(level);
        self.speed = self.level.clamp(MIN_SPEED, MAX_SPEED);

        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}
