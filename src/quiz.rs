//! Quiz-taking state machine: question progression, per-question countdown, scoring.
//!
//! One `QuizSession` owns everything a single play-through needs. Drivers (the terminal
//! client, tests) feed it ticks, selections and advances; it never does I/O itself.
//!
//! ```text
//! Start --start(name, questions)--> InProgress(0, 15)
//! InProgress(i, t>0) --tick--> InProgress(i, t-1)
//! InProgress(i, 0)   --tick--> AnswerRevealed(i, None)
//! InProgress(i, t)   --select(k)--> AnswerRevealed(i, Some(k))
//! AnswerRevealed(i, _) --advance--> InProgress(i+1, 15) | Finished
//! ```

use thiserror::Error;

use crate::domain::{NewScore, Question, OPTION_COUNT};

pub const QUESTION_SECONDS: u32 = 15;
pub const POINTS_PER_CORRECT: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  Start,
  InProgress { index: usize, remaining: u32 },
  AnswerRevealed { index: usize, selected: Option<usize> },
  Finished,
}

/// How an option button is drawn once the answer is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
  Neutral,
  Correct,
  Incorrect,
}

/// What one countdown tick shows. `shown` is the value before the decrement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
  pub shown: u32,
  /// Remaining share of the question time, 1.0 down to 0.0, for the time bar.
  pub fraction: f32,
  pub expired: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
  #[error("Enter your name!")]
  EmptyName,
  #[error("The question bank is empty")]
  NoQuestions,
  #[error("question {0} has no valid answer")]
  InvalidQuestion(usize),
  #[error("option {0} does not exist")]
  NoSuchOption(usize),
  #[error("cannot {action} while {phase:?}")]
  WrongPhase { action: &'static str, phase: Phase },
}

/// Trim the player's name; an empty result is rejected.
pub fn normalize_player_name(raw: &str) -> Result<String, QuizError> {
  let name = raw.trim();
  if name.is_empty() {
    return Err(QuizError::EmptyName);
  }
  Ok(name.to_string())
}

#[derive(Clone, Debug)]
pub struct QuizSession {
  questions: Vec<Question>,
  player_name: String,
  score: u64,
  phase: Phase,
}

impl Default for QuizSession {
  fn default() -> Self {
    Self::new()
  }
}

impl QuizSession {
  pub fn new() -> Self {
    Self { questions: Vec::new(), player_name: String::new(), score: 0, phase: Phase::Start }
  }

  /// Leave `Start` with a validated name and the fetched question set.
  /// On error the session stays in `Start`.
  pub fn start(&mut self, player_name: &str, questions: Vec<Question>) -> Result<(), QuizError> {
    if self.phase != Phase::Start {
      return Err(QuizError::WrongPhase { action: "start", phase: self.phase });
    }
    let name = normalize_player_name(player_name)?;
    if questions.is_empty() {
      return Err(QuizError::NoQuestions);
    }
    if let Some(index) = questions.iter().position(|q| !q.has_valid_answer()) {
      return Err(QuizError::InvalidQuestion(index));
    }
    self.questions = questions;
    self.player_name = name;
    self.score = 0;
    self.phase = Phase::InProgress { index: 0, remaining: QUESTION_SECONDS };
    Ok(())
  }

  /// One second of countdown. The tick that shows 0 reveals the answer with no selection.
  pub fn tick(&mut self) -> Result<Tick, QuizError> {
    let Phase::InProgress { index, remaining } = self.phase else {
      return Err(QuizError::WrongPhase { action: "tick", phase: self.phase });
    };
    let tick = Tick {
      shown: remaining,
      fraction: remaining as f32 / QUESTION_SECONDS as f32,
      expired: remaining == 0,
    };
    self.phase = if remaining == 0 {
      Phase::AnswerRevealed { index, selected: None }
    } else {
      Phase::InProgress { index, remaining: remaining - 1 }
    };
    Ok(tick)
  }

  /// Answer the current question. Returns whether the choice was correct.
  pub fn select(&mut self, option: usize) -> Result<bool, QuizError> {
    let Phase::InProgress { index, .. } = self.phase else {
      return Err(QuizError::WrongPhase { action: "select", phase: self.phase });
    };
    if option >= OPTION_COUNT {
      return Err(QuizError::NoSuchOption(option));
    }
    let correct = self.questions[index].is_correct(option);
    if correct {
      self.score += POINTS_PER_CORRECT;
    }
    self.phase = Phase::AnswerRevealed { index, selected: Some(option) };
    Ok(correct)
  }

  /// Move past a revealed answer to the next question or to `Finished`.
  pub fn advance(&mut self) -> Result<Phase, QuizError> {
    let Phase::AnswerRevealed { index, .. } = self.phase else {
      return Err(QuizError::WrongPhase { action: "advance", phase: self.phase });
    };
    self.phase = if index + 1 < self.questions.len() {
      Phase::InProgress { index: index + 1, remaining: QUESTION_SECONDS }
    } else {
      Phase::Finished
    };
    Ok(self.phase)
  }

  /// Drop the session and go back to `Start`.
  pub fn restart(&mut self) {
    *self = Self::new();
  }

  pub fn phase(&self) -> Phase {
    self.phase
  }

  pub fn score(&self) -> u64 {
    self.score
  }

  pub fn player_name(&self) -> &str {
    &self.player_name
  }

  pub fn total(&self) -> usize {
    self.questions.len()
  }

  pub fn is_finished(&self) -> bool {
    self.phase == Phase::Finished
  }

  /// Question on screen, if any.
  pub fn current_question(&self) -> Option<&Question> {
    match self.phase {
      Phase::InProgress { index, .. } | Phase::AnswerRevealed { index, .. } => self.questions.get(index),
      Phase::Start | Phase::Finished => None,
    }
  }

  /// 1-based number of the question on screen.
  pub fn question_number(&self) -> Option<usize> {
    match self.phase {
      Phase::InProgress { index, .. } | Phase::AnswerRevealed { index, .. } => Some(index + 1),
      Phase::Start | Phase::Finished => None,
    }
  }

  /// Options are clickable only while the countdown runs.
  pub fn options_enabled(&self) -> bool {
    matches!(self.phase, Phase::InProgress { .. })
  }

  /// Per-option marks after the reveal: the correct option, plus the wrong pick if there was one.
  pub fn marks(&self) -> Option<[OptionMark; OPTION_COUNT]> {
    let Phase::AnswerRevealed { index, selected } = self.phase else {
      return None;
    };
    let correct = self.questions[index].answer_index;
    let mut marks = [OptionMark::Neutral; OPTION_COUNT];
    if let Some(k) = selected.filter(|k| *k != correct) {
      marks[k] = OptionMark::Incorrect;
    }
    marks[correct] = OptionMark::Correct;
    Some(marks)
  }

  /// The score entry to submit once finished.
  pub fn submission(&self, elapsed_ms: u64) -> Result<NewScore, QuizError> {
    if !self.is_finished() {
      return Err(QuizError::WrongPhase { action: "submit", phase: self.phase });
    }
    Ok(NewScore { name: self.player_name.clone(), score: self.score, time_ms: elapsed_ms })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn question(answer_index: usize) -> Question {
    Question {
      question: format!("answer is {answer_index}"),
      options: ["a".into(), "b".into(), "c".into(), "d".into()],
      answer_index,
    }
  }

  fn bank() -> Vec<Question> {
    vec![question(0), question(1), question(2), question(3)]
  }

  fn run_out_clock(s: &mut QuizSession) -> Vec<u32> {
    let mut shown = Vec::new();
    loop {
      let t = s.tick().unwrap();
      shown.push(t.shown);
      if t.expired {
        return shown;
      }
    }
  }

  #[test]
  fn blank_name_stays_in_start() {
    let mut s = QuizSession::new();
    assert_eq!(s.start("   ", bank()), Err(QuizError::EmptyName));
    assert_eq!(s.phase(), Phase::Start);
    assert_eq!(normalize_player_name("  Ada "), Ok("Ada".to_string()));
  }

  #[test]
  fn empty_bank_stays_in_start() {
    let mut s = QuizSession::new();
    assert_eq!(s.start("Ada", Vec::new()), Err(QuizError::NoQuestions));
    assert_eq!(s.phase(), Phase::Start);
  }

  #[test]
  fn bank_with_out_of_range_answer_stays_in_start() {
    let mut s = QuizSession::new();
    let mut questions = bank();
    questions[2].answer_index = 7;
    assert_eq!(s.start("Ada", questions), Err(QuizError::InvalidQuestion(2)));
    assert_eq!(s.phase(), Phase::Start);
    assert_eq!(s.total(), 0);
    assert_eq!(s.marks(), None);
  }

  #[test]
  fn start_enters_first_question_with_full_clock() {
    let mut s = QuizSession::new();
    s.start(" Ada ", bank()).unwrap();
    assert_eq!(s.phase(), Phase::InProgress { index: 0, remaining: 15 });
    assert_eq!(s.player_name(), "Ada");
    assert_eq!(s.question_number(), Some(1));
    assert!(s.options_enabled());
  }

  #[test]
  fn countdown_shows_fifteen_down_to_zero_then_expires() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    let first = s.tick().unwrap();
    assert_eq!(first.shown, 15);
    assert_eq!(first.fraction, 1.0);

    let mut shown = vec![first.shown];
    shown.extend(run_out_clock(&mut s));
    assert_eq!(shown, (0..=15).rev().collect::<Vec<_>>());
    assert_eq!(s.phase(), Phase::AnswerRevealed { index: 0, selected: None });
    assert!(!s.options_enabled());
    assert_eq!(s.score(), 0);
    assert!(matches!(s.tick(), Err(QuizError::WrongPhase { .. })));
  }

  #[test]
  fn expiry_marks_only_the_correct_option() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    run_out_clock(&mut s);
    use OptionMark::*;
    assert_eq!(s.marks(), Some([Correct, Neutral, Neutral, Neutral]));
  }

  #[test]
  fn wrong_pick_marks_both_options() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    s.tick().unwrap();
    assert_eq!(s.select(2), Ok(false));
    use OptionMark::*;
    assert_eq!(s.marks(), Some([Correct, Neutral, Incorrect, Neutral]));
    assert_eq!(s.select(0), Err(QuizError::WrongPhase { action: "select", phase: s.phase() }));
  }

  #[test]
  fn out_of_range_option_is_rejected_without_reveal() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    assert_eq!(s.select(4), Err(QuizError::NoSuchOption(4)));
    assert!(s.options_enabled());
  }

  #[test]
  fn advance_requires_a_revealed_answer() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    assert!(matches!(s.advance(), Err(QuizError::WrongPhase { action: "advance", .. })));
  }

  #[test]
  fn two_right_one_expired_one_wrong_scores_200() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();

    assert_eq!(s.select(0), Ok(true));
    assert_eq!(s.score(), 100);
    assert_eq!(s.advance(), Ok(Phase::InProgress { index: 1, remaining: 15 }));

    s.tick().unwrap();
    assert_eq!(s.select(1), Ok(true));
    s.advance().unwrap();

    run_out_clock(&mut s);
    s.advance().unwrap();

    assert_eq!(s.select(0), Ok(false));
    assert_eq!(s.advance(), Ok(Phase::Finished));

    assert_eq!(s.score(), 200);
    assert_eq!(s.current_question(), None);
    let sub = s.submission(0).unwrap();
    assert_eq!(sub, NewScore { name: "Ada".into(), score: 200, time_ms: 0 });
  }

  #[test]
  fn submission_only_when_finished() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    assert!(s.submission(0).is_err());
  }

  #[test]
  fn restart_resets_everything() {
    let mut s = QuizSession::new();
    s.start("Ada", bank()).unwrap();
    s.select(0).unwrap();
    s.restart();
    assert_eq!(s.phase(), Phase::Start);
    assert_eq!(s.score(), 0);
    assert_eq!(s.total(), 0);
    s.start("Bob", bank()).unwrap();
    assert_eq!(s.player_name(), "Bob");
  }
}
