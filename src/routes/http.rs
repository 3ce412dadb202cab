//! HTTP endpoint handlers. These are thin wrappers over `AppState` and the leaderboard rules.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, State},
  response::IntoResponse,
  Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::leaderboard::validate_submission;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(State(state): State<Arc<AppState>>) -> Result<Json<QuestionsOut>, AppError> {
  let questions = state
    .list_questions()
    .await
    .map_err(AppError::storage("Unable to load questions"))?;
  info!(target: "quiz_buzz", count = questions.len(), "Questions served");
  Ok(Json(QuestionsOut { ok: true, questions }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<LeaderboardOut>, AppError> {
  let top = state
    .leaderboard()
    .await
    .map_err(AppError::storage("Unable to load leaderboard"))?;
  info!(target: "quiz_buzz", entries = top.len(), "Leaderboard served");
  Ok(Json(LeaderboardOut { ok: true, top }))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<LeaderboardOut>, AppError> {
  let Json(body) = body.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
  let raw = ScoreIn::from_object(body).ok_or_else(|| AppError::MalformedPayload("expected a JSON object".into()))?;
  let score = validate_submission(raw)?;
  info!(target: "quiz_buzz", name = %score.name, score = score.score, time_ms = score.time_ms, "Score submission accepted");
  let top = state
    .submit(score)
    .await
    .map_err(AppError::storage("Unable to save score"))?;
  Ok(Json(LeaderboardOut { ok: true, top }))
}
