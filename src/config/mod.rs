// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{session, util::format::DEFAULT_EXCERPT_WORDS};

const CONFIG_NAME: &str = "woco";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// Location of the device store holding the session record.
    pub database_file: String,
    pub session_days: u32,
    pub splash_millis: u64,
    pub excerpt_words: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database_file: "woco.db".to_string(),
            session_days: session::DEFAULT_SESSION_DAYS,
            splash_millis: session::splash::DEFAULT_DWELL.as_millis() as u64,
            excerpt_words: DEFAULT_EXCERPT_WORDS,
        }
    }
}

impl AppConfig {
    pub fn session_lifetime(&self) -> TimeDelta {
        session::session_lifetime(self.session_days)
    }

    pub fn splash_dwell(&self) -> Duration {
        Duration::from_millis(self.splash_millis)
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_else(|e| {
        warn!(error = %e, "failed to load configuration, using defaults");
        AppConfig::default()
    })
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_behaviour() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.splash_dwell(), Duration::from_millis(1500));
        assert_eq!(cfg.session_lifetime(), TimeDelta::days(30));
        assert_eq!(cfg.excerpt_words, 10);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"session_days": 7}"#).unwrap();
        assert_eq!(cfg.session_days, 7);
        assert_eq!(cfg.database_file, "woco.db");
    }
}
