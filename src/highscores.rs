//! Persisted high score
//!
//! A plain-text file holding one integer. A missing or unreadable file is
//! treated as a score of zero.

use std::path::{Path, PathBuf};

use crate::sim::GameState;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Best score seen so far and where it lives on disk
#[derive(Debug, Clone, Default)]
pub struct HighScore {
    best: u64,
    path: Option<PathBuf>,
}

impl HighScore {
    /// In-memory only (nothing is written)
    pub fn new(best: u64) -> Self {
        Self { best, path: None }
    }

    /// Read the high score from `path`, defaulting to zero
    pub fn load_from(path: &Path) -> Self {
        let best = match std::fs::read_to_string(path) {
            Ok(text) => match parse(&text) {
                Some(best) => {
                    log::info!("Loaded high score {} from {}", best, path.display());
                    best
                }
                None => {
                    log::warn!("Corrupt high score file {}, starting at 0", path.display());
                    0
                }
            },
            Err(_) => {
                log::info!("No high score found, starting fresh");
                0
            }
        };

        Self {
            best,
            path: Some(path.to_path_buf()),
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run's score. Returns true if it beat the old best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Record and persist in one step
    pub fn record_and_save(&mut self, score: u64) -> std::io::Result<bool> {
        if !self.record(score) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Overwrite the file with the current best
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        std::fs::write(path, format!("{}\n", self.best))?;
        log::info!("High score {} saved to {}", self.best, path.display());
        Ok(())
    }
}

/// Record the score a session stopped at, crashed or not
///
/// A session cut short mid-run still counts: its score becomes the new best
/// and is written out if it beats the stored one.
pub fn finish_session(state: &mut GameState, high_score: &mut HighScore) -> std::io::Result<bool> {
    state.score.finish_run();
    high_score.record_and_save(state.score.current)
}

/// Parse the first integer in the file, numerically
fn parse(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}
