//! Best score per difficulty
//!
//! The only thing the game persists between runs is one number per
//! difficulty. This record is the JSON shape used by file-backed storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Best scores keyed by storage key
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BestScores {
    #[serde(default)]
    pub scores: BTreeMap<String, u32>,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored best for `key` (0 if absent)
    pub fn get(&self, key: &str) -> u32 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: &str, score: u32) {
        self.scores.insert(key.to_string(), score);
    }

    /// Record `score` if it beats the stored best; returns true on a new best
    pub fn submit(&mut self, key: &str, score: u32) -> bool {
        if score > self.get(key) {
            self.set(key, score);
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }

    /// Parse a saved record; corrupt input reads as empty
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Discarding unreadable best scores: {}", e);
                Self::new()
            }
        }
    }
}
