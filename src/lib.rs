//! Quiz Buzz · timed quiz game
//!
//! - Axum score service over two flat JSON files (question bank, score collection)
//! - Static SPA fallback (`<STATIC_DIR>/index.html`)
//! - The quiz state machine plus an HTTP client and terminal driver for it

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod leaderboard;
pub mod play;
pub mod protocol;
pub mod quiz;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
