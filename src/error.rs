//! Error types for the score service and its storage layer.
//!
//! `AppError` is what handlers return; it renders into the `{ok:false, message}` envelope.
//! Storage details are logged server-side and never leak into the response body.

use std::path::PathBuf;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::protocol::ErrorOut;

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("failed to read {}: {source}", .path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to write {}: {source}", .path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", .path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("failed to encode score collection: {0}")]
  Encode(#[source] serde_json::Error),

  #[error("question {index} has answerIndex {answer_index} outside its options")]
  InvalidQuestion { index: usize, answer_index: usize },

  #[error("storage task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum AppError {
  #[error("Malformed payload: {0}")]
  MalformedPayload(String),

  /// Bad client input. The message names the offending field.
  #[error("{field} {reason}")]
  Validation { field: &'static str, reason: &'static str },

  #[error("{message}")]
  Storage {
    message: &'static str,
    #[source]
    source: StoreError,
  },
}

impl AppError {
  pub fn storage(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
    move |source| AppError::Storage { message, source }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = match &self {
      AppError::MalformedPayload(_) | AppError::Validation { .. } => {
        warn!(target: "quiz_buzz", error = %self, "Rejected request");
        StatusCode::BAD_REQUEST
      }
      AppError::Storage { message, source } => {
        error!(target: "quiz_buzz", error = %source, %message, "Storage failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    (status, Json(ErrorOut { ok: false, message: self.to_string() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_message_names_field() {
    let e = AppError::Validation { field: "name", reason: "must be 1-20 characters" };
    assert_eq!(e.to_string(), "name must be 1-20 characters");
    assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn storage_error_hides_details() {
    let source = StoreError::InvalidQuestion { index: 2, answer_index: 9 };
    let e = AppError::storage("Unable to load questions")(source);
    assert_eq!(e.to_string(), "Unable to load questions");
    assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
