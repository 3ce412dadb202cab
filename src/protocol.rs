//! Public protocol structs for the HTTP API (serde ready).
//! Shared by the axum handlers and the reqwest client so both ends agree on the envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Question, ScoreEntry};

/// `GET /api/questions` success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsOut {
    pub ok: bool,
    pub questions: Vec<Question>,
}

/// `GET /api/leaderboard` and `POST /api/score` success body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardOut {
    pub ok: bool,
    pub top: Vec<ScoreEntry>,
}

/// Failure body for every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub ok: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// Raw `POST /api/score` body. Fields stay untyped so validation can name
/// the offending field instead of failing the whole payload.
#[derive(Debug, Default)]
pub struct ScoreIn {
    pub name: Value,
    pub score: Value,
    pub time_ms: Value,
}

impl ScoreIn {
    /// Pull the fields out of a JSON object. Any other shape is not a submission;
    /// missing fields come back as `Null`.
    pub fn from_object(body: Value) -> Option<Self> {
        let Value::Object(mut map) = body else {
            return None;
        };
        Some(Self {
            name: map.remove("name").unwrap_or_default(),
            score: map.remove("score").unwrap_or_default(),
            time_ms: map.remove("timeMs").unwrap_or_default(),
        })
    }
}

/// Any reply from the API, as seen by a client that does not know up front
/// whether the call succeeded.
#[derive(Debug, Deserialize)]
pub struct ApiReply {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    #[serde(default)]
    pub top: Option<Vec<ScoreEntry>>,
}
