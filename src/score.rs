//! Distance meter and session high score
//!
//! Kept in memory only; a restart keeps the high score, a new session does not.

use serde::{Deserialize, Serialize};

use crate::consts::{ACHIEVEMENT_DISTANCE, DISTANCE_COEFFICIENT};

/// Running distance and best score for the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceMeter {
    /// Raw distance in pixels
    pub distance: f32,
    /// Best score reached this session
    pub high_score: u64,
    /// Last milestone that was announced
    last_milestone: u64,
}

impl Default for DistanceMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceMeter {
    pub fn new() -> Self {
        Self {
            distance: 0.0,
            high_score: 0,
            last_milestone: 0,
        }
    }

    /// Score shown to the player for a raw distance
    pub fn score_for(distance: f32) -> u64 {
        if distance <= 0.0 {
            return 0;
        }
        (distance * DISTANCE_COEFFICIENT).round() as u64
    }

    pub fn score(&self) -> u64 {
        Self::score_for(self.distance)
    }

    /// Add distance. Returns the milestone crossed, if any.
    pub fn add(&mut self, delta: f32) -> Option<u64> {
        self.distance += delta;
        let milestone = self.score() / ACHIEVEMENT_DISTANCE * ACHIEVEMENT_DISTANCE;
        if milestone > self.last_milestone {
            self.last_milestone = milestone;
            return Some(milestone);
        }
        None
    }

    /// Check if the current score beats the best
    pub fn qualifies(&self) -> bool {
        self.score() > self.high_score
    }

    /// Fold the current score into the high score. Returns true if it improved.
    pub fn record_high_score(&mut self) -> bool {
        if !self.qualifies() {
            return false;
        }
        self.high_score = self.score();
        true
    }

    /// Start a new run, keeping the high score
    pub fn reset(&mut self) {
        self.distance = 0.0;
        self.last_milestone = 0;
    }
}
