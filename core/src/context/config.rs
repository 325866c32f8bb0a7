use std::path::PathBuf;

use pedtrack_types::AppConfig;
use thiserror::Error;

/// Application name used for the config file location.
pub const APP_NAME: &str = "pedtrack";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),
}

/// Load/save helpers for [`AppConfig`], kept out of the types crate so it
/// stays free of filesystem dependencies.
pub trait AppConfigExt: Sized {
    /// Load the config, falling back to defaults when it is missing or unreadable.
    fn load() -> Self;

    fn try_load() -> Result<Self, ConfigError>;

    fn save(&self) -> Result<(), ConfigError>;

    fn config_path() -> Result<PathBuf, ConfigError>;

    /// Configured chat log, or the game's default location.
    fn resolved_log_path(&self) -> PathBuf;

    /// Configured session directory, or `<data dir>/pedtrack/sessions`.
    fn resolved_sessions_dir(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self, ConfigError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self)?;
        tracing::debug!("Config saved");
        Ok(())
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    fn resolved_log_path(&self) -> PathBuf {
        if !self.log_path.trim().is_empty() {
            return PathBuf::from(&self.log_path);
        }
        dirs::document_dir()
            .unwrap_or_default()
            .join("Entropia Universe")
            .join("chat.log")
    }

    fn resolved_sessions_dir(&self) -> PathBuf {
        match &self.sessions_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => crate::storage::default_sessions_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_paths() {
        let config = AppConfig {
            log_path: "/tmp/chat.log".to_string(),
            sessions_dir: Some("/tmp/sessions".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_log_path(), PathBuf::from("/tmp/chat.log"));
        assert_eq!(config.resolved_sessions_dir(), PathBuf::from("/tmp/sessions"));
    }

    #[test]
    fn test_default_paths() {
        let config = AppConfig::default();
        assert!(config.resolved_log_path().ends_with("Entropia Universe/chat.log"));
        assert!(config.resolved_sessions_dir().ends_with("pedtrack/sessions"));
    }
}
