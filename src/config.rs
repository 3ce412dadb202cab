//! Server settings: defaults, an optional TOML file, then environment overrides.
//!
//! Schema of the TOML file (every key optional):
//!   port = 3000
//!   data_dir = "./data"
//!   static_dir = "./static"
//!   leaderboard_size = 10

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::leaderboard::LEADERBOARD_SIZE;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
  pub port: u16,
  pub data_dir: PathBuf,
  pub static_dir: PathBuf,
  pub leaderboard_size: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      port: DEFAULT_PORT,
      data_dir: PathBuf::from("./data"),
      static_dir: PathBuf::from("./static"),
      leaderboard_size: LEADERBOARD_SIZE,
    }
  }
}

impl Settings {
  /// Build settings from QUIZ_CONFIG_PATH (if set) and PORT / DATA_DIR / STATIC_DIR.
  pub fn from_env() -> Self {
    let mut settings = load_settings_from_env().unwrap_or_default();
    settings.apply_overrides(|key| std::env::var(key).ok());
    settings
  }

  /// Environment variables win over the file. Unparsable PORT keeps the previous value.
  pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = lookup("PORT") {
      match raw.parse::<u16>() {
        Ok(port) => self.port = port,
        Err(e) => warn!(target: "quiz_buzz", %raw, error = %e, port = self.port, "Invalid PORT; keeping configured port"),
      }
    }
    if let Some(dir) = lookup("DATA_DIR") {
      self.data_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("STATIC_DIR") {
      self.static_dir = PathBuf::from(dir);
    }
  }
}

/// Attempt to load `Settings` from QUIZ_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_settings_from_env() -> Option<Settings> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  load_settings_from_path(Path::new(&path))
}

/// Read and parse a TOML settings file. Failures are logged and yield None.
pub fn load_settings_from_path(path: &Path) -> Option<Settings> {
  let path_str = path.display();
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<Settings>(&s) {
      Ok(cfg) => {
        info!(target: "quiz_buzz", path = %path_str, "Loaded settings (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quiz_buzz", path = %path_str, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quiz_buzz", path = %path_str, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
