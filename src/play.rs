//! Terminal quiz client. Drives a `QuizSession` from stdin with a one-second countdown
//! and reports to the score service when the quiz is over.
//!
//! Keys: `1`-`4` pick an option while the clock runs, Enter moves on after the reveal.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument};

use crate::client::{ApiClient, ClientError};
use crate::domain::{ScoreEntry, OPTION_COUNT};
use crate::quiz::{normalize_player_name, OptionMark, QuizError, QuizSession};

#[derive(Error, Debug)]
pub enum PlayError {
  #[error(transparent)]
  Client(#[from] ClientError),
  #[error(transparent)]
  Quiz(#[from] QuizError),
  #[error("input error: {0}")]
  Io(#[from] std::io::Error),
  #[error("input closed before the quiz finished")]
  InputClosed,
}

/// Play one quiz against `server` on stdin/stdout.
#[instrument(level = "info", skip_all, fields(%server))]
pub async fn run(server: &str, player_name: &str) -> Result<(), PlayError> {
  let api = ApiClient::new(server);
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let top = play(&api, player_name, &mut lines).await?;
  println!("\nLeaderboard");
  print!("{}", render_leaderboard(&top));
  Ok(())
}

/// Fetch questions, play them from `input`, submit, and return the leaderboard.
pub async fn play<R>(api: &ApiClient, player_name: &str, input: &mut Lines<R>) -> Result<Vec<ScoreEntry>, PlayError>
where
  R: AsyncBufRead + Unpin,
{
  // Reject before touching the network.
  let name = normalize_player_name(player_name)?;
  let questions = api.questions().await?;

  let mut session = QuizSession::new();
  session.start(&name, questions)?;
  let started = Instant::now();

  while !session.is_finished() {
    ask(&mut session, input).await?;
    reveal(&session);
    match input.next_line().await? {
      Some(_) => {
        session.advance()?;
      }
      None => return Err(PlayError::InputClosed),
    }
  }

  println!("\n{}, you scored {} points!", session.player_name(), session.score());
  let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
  let submission = session.submission(elapsed_ms)?;
  api.submit_score(&submission).await?;
  info!(target: "quiz_buzz", score = submission.score, elapsed_ms, "Score submitted");
  Ok(api.leaderboard().await?)
}

/// Run the countdown for the current question until an answer or expiry.
async fn ask<R>(session: &mut QuizSession, input: &mut Lines<R>) -> Result<(), PlayError>
where
  R: AsyncBufRead + Unpin,
{
  if let (Some(n), Some(q)) = (session.question_number(), session.current_question()) {
    println!("\nQuestion {n}/{}  (score {})", session.total(), session.score());
    println!("{}", q.question);
    for (i, opt) in q.options.iter().enumerate() {
      println!("  {}. {opt}", i + 1);
    }
  }

  // First tick fires immediately so 15 is shown right away.
  let mut ticker = interval(Duration::from_secs(1));
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

  loop {
    tokio::select! {
      _ = ticker.tick() => {
        let tick = session.tick()?;
        println!("{} {:>2}s", time_bar(tick.fraction), tick.shown);
        if tick.expired {
          println!("Time's up!");
          return Ok(());
        }
      }
      line = input.next_line() => {
        let Some(line) = line? else { return Err(PlayError::InputClosed) };
        match parse_choice(&line) {
          Some(option) => {
            session.select(option)?;
            return Ok(());
          }
          None => println!("Pick 1-{OPTION_COUNT}"),
        }
      }
    }
  }
}

fn reveal(session: &QuizSession) {
  let (Some(q), Some(marks)) = (session.current_question(), session.marks()) else { return };
  for (i, (opt, mark)) in q.options.iter().zip(marks).enumerate() {
    let tag = match mark {
      OptionMark::Correct => "[correct]",
      OptionMark::Incorrect => "[wrong]",
      OptionMark::Neutral => "",
    };
    println!("  {}. {opt} {tag}", i + 1);
  }
  println!("Press Enter to continue");
}

/// `"3"` -> option index 2.
fn parse_choice(line: &str) -> Option<usize> {
  line.trim().parse::<usize>().ok().filter(|n| (1..=OPTION_COUNT).contains(n)).map(|n| n - 1)
}

fn time_bar(fraction: f32) -> String {
  const WIDTH: usize = 15;
  let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f32).round() as usize;
  format!("[{}{}]", "#".repeat(filled), " ".repeat(WIDTH - filled))
}

pub fn render_leaderboard(top: &[ScoreEntry]) -> String {
  top.iter()
    .enumerate()
    .map(|(i, e)| format!("{}. {} - {}\n", i + 1, e.name, e.score))
    .collect()
}
