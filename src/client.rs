//! HTTP client for the score service: the three calls a quiz client makes.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{NewScore, Question, ScoreEntry};
use crate::protocol::ApiReply;

#[derive(Error, Debug)]
pub enum ClientError {
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("server answered {status}: {message}")]
  Server { status: StatusCode, message: String },

  #[error("reply is missing `{0}`")]
  MissingField(&'static str),
}

#[derive(Clone, Debug)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
}

impl ApiClient {
  /// `base_url` like `http://localhost:3000`; a trailing slash is fine.
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { http: reqwest::Client::new(), base_url }
  }

  #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
  pub async fn questions(&self) -> Result<Vec<Question>, ClientError> {
    let reply = self.http.get(self.url("/api/questions")).send().await?;
    Self::read_reply(reply).await?.questions.ok_or(ClientError::MissingField("questions"))
  }

  #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
  pub async fn leaderboard(&self) -> Result<Vec<ScoreEntry>, ClientError> {
    let reply = self.http.get(self.url("/api/leaderboard")).send().await?;
    Self::read_reply(reply).await?.top.ok_or(ClientError::MissingField("top"))
  }

  /// Submit a finished quiz. Returns the recomputed top entries.
  #[instrument(level = "debug", skip(self, score), fields(base_url = %self.base_url, name = %score.name))]
  pub async fn submit_score(&self, score: &NewScore) -> Result<Vec<ScoreEntry>, ClientError> {
    let reply = self.http.post(self.url("/api/score")).json(score).send().await?;
    Self::read_reply(reply).await?.top.ok_or(ClientError::MissingField("top"))
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn read_reply(reply: reqwest::Response) -> Result<ApiReply, ClientError> {
    let status = reply.status();
    let body: ApiReply = match reply.json().await {
      Ok(b) => b,
      // Non-JSON error pages still carry a useful status.
      Err(_) if !status.is_success() => {
        return Err(ClientError::Server { status, message: "unexpected response".into() });
      }
      Err(e) => return Err(e.into()),
    };
    debug!(target: "quiz_buzz", %status, ok = body.ok, "API reply");
    if !status.is_success() || !body.ok {
      let message = body.message.unwrap_or_else(|| "something went wrong".into());
      return Err(ClientError::Server { status, message });
    }
    Ok(body)
  }
}
