//! Session score accounting
//!
//! One record per finished petting session, kept for the final tally.
//! Failed sessions still bank their accumulated purr score - partial
//! credit for the good petting that happened before things went wrong.
//! Persisted to JSON on native so a run's history survives the process.

use serde::{Deserialize, Serialize};

use crate::sim::{Feedback, GameEvent, TigerId};

/// One finished petting session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub tiger: TigerId,
    pub outcome: Feedback,
    pub purr_score: f32,
    pub ticks_spent: u32,
}

/// All sessions of the current run, in the order they finished
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scorebook {
    pub records: Vec<SessionRecord>,
}

impl Scorebook {
    /// Scorebook file name (JSON, next to the binary)
    const FILE_NAME: &'static str = "wild_tiger_scores.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record session-end events from a tick's event batch
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::PettingEnded {
                tiger,
                outcome,
                purr_score,
                ticks_spent,
            } = event
            {
                self.records.push(SessionRecord {
                    tiger: *tiger,
                    outcome: *outcome,
                    purr_score: *purr_score,
                    ticks_spent: *ticks_spent,
                });
            }
        }
    }

    /// Sum of purr scores across every session, failures included
    pub fn total_score(&self) -> f32 {
        self.records.iter().map(|r| r.purr_score).sum()
    }

    /// Sessions that ended with a happy tiger
    pub fn successes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == Feedback::Purr)
            .count()
    }

    /// The best single session, if any finished yet
    pub fn best(&self) -> Option<&SessionRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.purr_score.total_cmp(&b.purr_score))
    }

    /// Load the scorebook from disk, empty if absent or unreadable
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Failed to parse {}: {}", Self::FILE_NAME, e);
                Self::new()
            }),
            Err(_) => Self::new(),
        }
    }

    /// Save to disk (best effort)
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Err(e) = std::fs::write(Self::FILE_NAME, json) {
                log::warn!("Failed to save scorebook: {}", e);
            }
        }
    }
}
