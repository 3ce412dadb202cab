//! Flat-file storage for the question bank and the score collection.
//!
//! Both stores sit behind traits so a durable backend (embedded KV, locked file) can
//! replace the JSON files later. The JSON score store does read-modify-write with no
//! locking; two racing submissions can drop one entry.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use crate::domain::{Question, ScoreEntry};
use crate::error::StoreError;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const SCORES_FILE: &str = "scores.json";

/// Read-only source of quiz questions.
pub trait QuestionBank: Send + Sync {
    fn questions(&self) -> Result<Vec<Question>, StoreError>;
}

/// Append-only collection of score entries.
pub trait ScoreStore: Send + Sync {
    /// Every entry ever persisted, in submission order.
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Replace the persisted collection.
    fn save(&self, entries: &[ScoreEntry]) -> Result<(), StoreError>;

    /// Append one entry and return the full updated collection. An unreadable
    /// collection counts as empty.
    fn append(&self, entry: ScoreEntry) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!(target: "quiz_buzz", error = %e, "Score collection unreadable; starting from empty");
            Vec::new()
        });
        entries.push(entry);
        self.save(&entries)?;
        Ok(entries)
    }
}

#[derive(Debug, Clone)]
pub struct JsonQuestionBank {
    path: PathBuf,
}

impl JsonQuestionBank {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(QUESTIONS_FILE))
    }
}

impl QuestionBank for JsonQuestionBank {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions: Vec<Question> = read_json(&self.path)?;
        if let Some((index, q)) = questions.iter().enumerate().find(|(_, q)| !q.has_valid_answer()) {
            return Err(StoreError::InvalidQuestion { index, answer_index: q.answer_index });
        }
        debug!(target: "quiz_buzz", count = questions.len(), "Question bank loaded");
        Ok(questions)
    }
}

#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SCORES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        read_json(&self.path)
    }

    #[instrument(level = "debug", skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    fn save(&self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(entries).map_err(StoreError::Encode)?;
        fs::write(&self.path, body).map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse { path: path.to_path_buf(), source })
}
