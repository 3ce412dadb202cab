//! Leaderboard ranking and score submission validation.

use serde_json::Value;

use crate::domain::{NewScore, ScoreEntry};
use crate::error::AppError;
use crate::protocol::ScoreIn;

pub const LEADERBOARD_SIZE: usize = 10;
pub const MAX_NAME_CHARS: usize = 20;

/// Rank by score descending, then elapsed time ascending, and keep the first `limit`.
/// The sort is stable: full ties keep submission order.
pub fn rank(entries: &[ScoreEntry], limit: usize) -> Vec<ScoreEntry> {
  let mut ranked = entries.to_vec();
  ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.time_ms.cmp(&b.time_ms)));
  ranked.truncate(limit);
  ranked
}

/// Check a raw submission. Fields are checked in order name, score, timeMs; the first
/// violation wins.
pub fn validate_submission(raw: ScoreIn) -> Result<NewScore, AppError> {
  let name = match &raw.name {
    Value::String(s) => s.trim(),
    _ => return Err(AppError::Validation { field: "name", reason: "must be a string of 1-20 characters" }),
  };
  let len = name.chars().count();
  if len < 1 || len > MAX_NAME_CHARS {
    return Err(AppError::Validation { field: "name", reason: "must be 1-20 characters" });
  }

  let score = non_negative_integer(&raw.score)
    .ok_or(AppError::Validation { field: "score", reason: "must be a non-negative integer" })?;
  let time_ms = non_negative_integer(&raw.time_ms)
    .ok_or(AppError::Validation { field: "timeMs", reason: "must be a non-negative integer" })?;

  Ok(NewScore { name: name.to_string(), score, time_ms })
}

fn non_negative_integer(v: &Value) -> Option<u64> {
  match v {
    Value::Number(n) => n.as_u64().or_else(|| {
      // 300.0 is still a whole number
      n.as_f64().filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64).map(|f| f as u64)
    }),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn entry(name: &str, score: u64, time_ms: u64) -> ScoreEntry {
    ScoreEntry { name: name.into(), score, time_ms, when: "2024-01-01T00:00:00.000Z".into() }
  }

  fn raw(v: Value) -> ScoreIn {
    ScoreIn::from_object(v).unwrap()
  }

  #[test]
  fn rank_sorts_by_score_then_time() {
    let entries = vec![entry("a", 100, 5000), entry("b", 300, 9000), entry("c", 300, 1000), entry("d", 200, 0)];
    let names: Vec<_> = rank(&entries, LEADERBOARD_SIZE).into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["c", "b", "d", "a"]);
  }

  #[test]
  fn rank_truncates_to_limit() {
    let entries: Vec<_> = (0..25).map(|i| entry(&format!("p{i}"), i * 10, 0)).collect();
    let top = rank(&entries, LEADERBOARD_SIZE);
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].score, 240);
    assert_eq!(top[9].score, 150);
  }

  #[test]
  fn rank_keeps_submission_order_on_full_ties() {
    let entries = vec![entry("first", 100, 0), entry("second", 100, 0)];
    let top = rank(&entries, LEADERBOARD_SIZE);
    assert_eq!(top[0].name, "first");
    assert_eq!(top[1].name, "second");
  }

  #[test]
  fn accepts_and_trims_valid_submission() {
    let s = validate_submission(raw(json!({"name": "  Ada ", "score": 300, "timeMs": 12000}))).unwrap();
    assert_eq!(s, NewScore { name: "Ada".into(), score: 300, time_ms: 12000 });
  }

  #[test]
  fn whole_float_numbers_are_accepted() {
    let s = validate_submission(raw(json!({"name": "Ada", "score": 300.0, "timeMs": 0}))).unwrap();
    assert_eq!(s.score, 300);
  }

  #[test]
  fn numbers_past_u64_are_rejected_not_clamped() {
    // 2^64 is exactly representable as f64 but not as u64
    let err = validate_submission(raw(json!({"name": "Ada", "score": 18446744073709551616.0_f64, "timeMs": 0}))).unwrap_err();
    assert!(matches!(err, AppError::Validation { field: "score", .. }));
    let ok = validate_submission(raw(json!({"name": "Ada", "score": u64::MAX, "timeMs": 0}))).unwrap();
    assert_eq!(ok.score, u64::MAX);
  }

  #[test]
  fn only_objects_are_submissions() {
    assert!(ScoreIn::from_object(json!(["Ada", 300, 0])).is_none());
    assert!(ScoreIn::from_object(json!("Ada")).is_none());
    let missing = ScoreIn::from_object(json!({"name": "Ada"})).unwrap();
    assert_eq!(missing.score, Value::Null);
  }

  #[test]
  fn name_bounds() {
    for bad in [json!(""), json!("   "), json!("x".repeat(21)), json!(42), Value::Null] {
      let err = validate_submission(raw(json!({"name": bad, "score": 1, "timeMs": 1}))).unwrap_err();
      assert!(matches!(err, AppError::Validation { field: "name", .. }), "{err}");
    }
    // 20 characters after trimming, multibyte included
    let ok = validate_submission(raw(json!({"name": format!(" {} ", "é".repeat(20)), "score": 1, "timeMs": 1})));
    assert!(ok.is_ok());
  }

  #[test]
  fn score_and_time_must_be_non_negative_integers() {
    for (score, time_ms, field) in [
      (json!(-1), json!(0), "score"),
      (json!("100"), json!(0), "score"),
      (json!(1.5), json!(0), "score"),
      (json!(100), json!(-5), "timeMs"),
      (json!(100), Value::Null, "timeMs"),
    ] {
      let err = validate_submission(raw(json!({"name": "Ada", "score": score, "timeMs": time_ms}))).unwrap_err();
      match err {
        AppError::Validation { field: f, .. } => assert_eq!(f, field),
        other => panic!("unexpected error: {other}"),
      }
    }
  }
}
