//! Quiz Buzz · server and terminal client
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   DATA_DIR          : directory with questions.json and scores.json (default ./data)
//!   STATIC_DIR        : SPA directory (default ./static)
//!   QUIZ_CONFIG_PATH  : optional TOML file with the same settings
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use quiz_buzz::config::Settings;
use quiz_buzz::routes::build_router;
use quiz_buzz::state::AppState;
use quiz_buzz::{play, telemetry};

#[derive(Parser)]
#[command(name = "quiz-buzz", version, about = "Timed quiz game with a flat-file leaderboard")]
struct Cli {
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Run the HTTP server (default)
  Serve,
  /// Play a quiz in the terminal against a running server
  Play {
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,
    #[arg(long)]
    name: String,
  },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();
  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve().await,
    Command::Play { server, name } => {
      telemetry::init_tracing(telemetry::PLAY_FILTER);
      play::run(&server, &name).await?;
      Ok(())
    }
  }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing(telemetry::SERVER_FILTER);

  let settings = Settings::from_env();
  let state = Arc::new(AppState::new(&settings));
  let app = build_router(state, &settings.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "quiz_buzz", %addr, static_dir = %settings.static_dir.display(), "Quiz Buzz server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "quiz_buzz", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  info!(target: "quiz_buzz", "Shutting down");
}
