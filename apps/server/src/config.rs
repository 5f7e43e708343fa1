// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Building record written by the import stage.
    pub buildings_path: PathBuf,
    /// Reference point record written by the import stage.
    pub center_path: PathBuf,
    /// Model substitution definition. `MODELS_PATH=""` disables substitution.
    pub models_path: Option<PathBuf>,
    /// Maximum request body size in KB.
    pub max_body_kb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Allowed CORS origins (comma-separated, or "*" for any).
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());

        Self {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080").parse().unwrap_or(8080),
            buildings_path: var("BUILDINGS_PATH", "data/buildings.json").into(),
            center_path: var("CENTER_PATH", "data/center.json").into(),
            models_path: Some(var("MODELS_PATH", "data/models.json"))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            max_body_kb: var("MAX_BODY_KB", "64").parse().unwrap_or(64),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            cors_origins: var("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            log_format: match var("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Any origin allowed.
    pub fn cors_permissive(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
