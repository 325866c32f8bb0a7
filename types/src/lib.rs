//! Shared configuration types for pedtrack.
//!
//! These are plain serde structs so the CLI and any future front end can read
//! and write the same config file without depending on the core crate.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// Default interval between unconditional log polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default quiet period used to coalesce bursts of file change notifications.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Timing knobs for the log tailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailerSettings {
    pub poll_interval_ms: u64,
    pub debounce_ms: u64,
}

impl Default for TailerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Persisted application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the chat log to tail.
    pub log_path: String,
    /// Avatar name, used to pick the player's own globals out of the broadcast channel.
    pub player_name: String,
    /// Cost per shot charged to shots fired without an active loadout.
    pub manual_cost_per_shot: f64,
    /// Swap `.` and `,` in printed numbers.
    pub european_numbers: bool,
    /// Override for the session store directory.
    pub sessions_dir: Option<String>,
    /// Loadout definition (TOML) activated when watching.
    pub loadout_path: Option<String>,
    pub tailer: TailerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: String::new(),
            player_name: String::new(),
            manual_cost_per_shot: 0.0,
            european_numbers: false,
            sessions_dir: None,
            loadout_path: None,
            tailer: TailerSettings::default(),
        }
    }
}
