//! Application state: the question bank, the score store and the leaderboard size.
//!
//! No in-process mutable state lives here; everything is read from the stores per request.
//! Store calls are blocking file I/O, so they run on tokio's blocking pool.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{info, instrument};

use crate::config::Settings;
use crate::domain::{NewScore, Question, ScoreEntry};
use crate::error::StoreError;
use crate::leaderboard::rank;
use crate::store::{JsonQuestionBank, JsonScoreStore, QuestionBank, ScoreStore};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<dyn QuestionBank>,
    pub scores: Arc<dyn ScoreStore>,
    pub leaderboard_size: usize,
}

impl AppState {
    /// JSON-file stores under `settings.data_dir`.
    #[instrument(level = "info", skip_all)]
    pub fn new(settings: &Settings) -> Self {
        info!(target: "quiz_buzz", data_dir = %settings.data_dir.display(), leaderboard_size = settings.leaderboard_size, "Using JSON file stores");
        Self::with_stores(
            Arc::new(JsonQuestionBank::in_dir(&settings.data_dir)),
            Arc::new(JsonScoreStore::in_dir(&settings.data_dir)),
            settings.leaderboard_size,
        )
    }

    pub fn with_stores(questions: Arc<dyn QuestionBank>, scores: Arc<dyn ScoreStore>, leaderboard_size: usize) -> Self {
        Self { questions, scores, leaderboard_size }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let bank = self.questions.clone();
        tokio::task::spawn_blocking(move || bank.questions()).await?
    }

    /// Current top entries, recomputed from the full collection.
    #[instrument(level = "debug", skip(self))]
    pub async fn leaderboard(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        let store = self.scores.clone();
        let entries = tokio::task::spawn_blocking(move || store.load()).await??;
        Ok(rank(&entries, self.leaderboard_size))
    }

    /// Persist a validated submission stamped with the current time and return the new top entries.
    #[instrument(level = "debug", skip(self, score), fields(name = %score.name, score = score.score))]
    pub async fn submit(&self, score: NewScore) -> Result<Vec<ScoreEntry>, StoreError> {
        let entry = score.stamp(now_iso());
        let store = self.scores.clone();
        let entries = tokio::task::spawn_blocking(move || store.append(entry)).await??;
        info!(target: "quiz_buzz", total = entries.len(), "Score recorded");
        Ok(rank(&entries, self.leaderboard_size))
    }
}

/// `2024-05-01T10:00:00.123Z`, the same shape a browser's `toISOString` produces.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
