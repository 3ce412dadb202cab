//! Domain models shared by the score service and the quiz client: questions and score entries.
//!
//! Field names on the wire match the JSON data files (`answerIndex`, `timeMs`) so existing
//! `questions.json` / `scores.json` files load unchanged.

use serde::{Deserialize, Serialize};

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice question from the static bank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub question: String,
  pub options: [String; OPTION_COUNT],
  #[serde(rename = "answerIndex")]
  pub answer_index: usize,
}

impl Question {
  pub fn is_correct(&self, option: usize) -> bool {
    option == self.answer_index
  }

  /// The bank is external input; an answer index outside the options is unusable.
  pub fn has_valid_answer(&self) -> bool {
    self.answer_index < OPTION_COUNT
  }
}

/// A persisted record of one completed quiz attempt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
  pub name: String,
  pub score: u64,
  #[serde(rename = "timeMs")]
  pub time_ms: u64,
  /// ISO-8601 UTC timestamp, millisecond precision (`2024-05-01T10:00:00.000Z`).
  pub when: String,
}

/// A validated, not yet persisted score submission.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct NewScore {
  pub name: String,
  pub score: u64,
  #[serde(rename = "timeMs")]
  pub time_ms: u64,
}

impl NewScore {
  /// Stamp the submission, producing the entry that gets persisted.
  pub fn stamp(self, when: String) -> ScoreEntry {
    ScoreEntry { name: self.name, score: self.score, time_ms: self.time_ms, when }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn question_uses_bank_field_names() {
    let raw = r#"{"question":"2+2?","options":["1","2","3","4"],"answerIndex":3}"#;
    let q: Question = serde_json::from_str(raw).unwrap();
    assert_eq!(q.answer_index, 3);
    assert!(q.is_correct(3));
    assert!(!q.is_correct(0));
    assert!(q.has_valid_answer());
  }

  #[test]
  fn question_requires_four_options() {
    let raw = r#"{"question":"?","options":["a","b","c"],"answerIndex":0}"#;
    assert!(serde_json::from_str::<Question>(raw).is_err());
  }

  #[test]
  fn score_entry_serializes_time_ms_camel_case() {
    let e = NewScore { name: "Ada".into(), score: 300, time_ms: 12000 }.stamp("2024-05-01T10:00:00.000Z".into());
    let v = serde_json::to_value(&e).unwrap();
    assert_eq!(v["timeMs"], 12000);
    assert_eq!(v["when"], "2024-05-01T10:00:00.000Z");
    assert!(v.get("time_ms").is_none());
  }
}
