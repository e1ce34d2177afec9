//! Best-score persistence
//!
//! The simulation talks to storage through `ScoreStore` only:
//! - absent keys read as 0
//! - read failures read as 0
//! - write failures are logged and dropped
//!
//! Nothing here ever blocks or aborts gameplay.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::highscores::BestScores;
use crate::sim::Difficulty;

/// Storage key for a difficulty's best score
pub fn best_score_key(difficulty: Difficulty) -> String {
    format!("paperPlane_bestScore_{}", difficulty.as_str())
}

/// Narrow storage interface used by the game controller
pub trait ScoreStore {
    /// Best score stored under `key` (0 if absent or unreadable)
    fn read_best(&self, key: &str) -> u32;
    /// Store `score` under `key`; failures are swallowed
    fn write_best(&mut self, key: &str, score: u32);

    /// Keep `score` only if it beats the stored best; true on a new best
    fn submit_best(&mut self, key: &str, score: u32) -> bool {
        if score > self.read_best(key) {
            self.write_best(key, score);
            true
        } else {
            false
        }
    }
}

/// Process-local store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: BestScores,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn read_best(&self, key: &str) -> u32 {
        self.scores.get(key)
    }

    fn write_best(&mut self, key: &str, score: u32) {
        self.scores.set(key, score);
    }

    fn submit_best(&mut self, key: &str, score: u32) -> bool {
        self.scores.submit(key, score)
    }
}

/// Store that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl ScoreStore for NullStore {
    fn read_best(&self, _key: &str) -> u32 {
        0
    }

    fn write_best(&mut self, _key: &str, _score: u32) {}
}

/// JSON file store for native builds
///
/// The whole record is rewritten on every save via a temp file + rename.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    scores: BestScores,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or lazily create) a store at `path`
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let scores = match std::fs::read_to_string(&path) {
            Ok(json) => BestScores::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BestScores::new(),
            Err(e) => {
                log::warn!("Could not read {}: {} - best scores start at 0", path.display(), e);
                BestScores::new()
            }
        };
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> std::io::Result<()> {
        let json = self.scores.to_json().unwrap_or_default();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::warn!("Failed to save best scores to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn read_best(&self, key: &str) -> u32 {
        self.scores.get(key)
    }

    fn write_best(&mut self, key: &str, score: u32) {
        self.scores.set(key, score);
        self.persist();
    }

    /// Only touches the disk when the record actually changed
    fn submit_best(&mut self, key: &str, score: u32) -> bool {
        let improved = self.scores.submit(key, score);
        if improved {
            self.persist();
        }
        improved
    }
}

/// Browser LocalStorage store (one item per key)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn read_best(&self, key: &str) -> u32 {
        Self::storage()
            .and_then(|s| s.get_item(key).ok().flatten())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    fn write_best(&mut self, key: &str, score: u32) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &score.to_string()).is_err() {
                    log::warn!("LocalStorage write failed for {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable - best score not saved"),
        }
    }
}
