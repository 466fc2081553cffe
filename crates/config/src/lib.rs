//! Configuration loading and validation.
//!
//! Sources are layered: built-in defaults, then an optional TOML or JSON
//! config file (an explicit path, or `config.toml` in the platform config
//! directory), then `SORTIE_`-prefixed environment variables, highest layer
//! winning. Nested keys use `__` in the environment, so `SORTIE_SERVICE__URL`
//! overrides `service.url`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Connection settings for the store's command bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Command-bridge endpoint URL.
    pub url: String,
    /// Group credential sent with every command.
    pub group: String,
    /// Password credential sent with every command.
    pub password: String,
    /// Per-request timeout. Inventory commands are slow on large accounts.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { url: String::new(), group: String::new(), password: String::new(), timeout_secs: 60 }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that everything an HTTP transport needs is present.
    pub fn require_complete(&self) -> Result<()> {
        for (field, value) in [("service.url", &self.url), ("service.group", &self.group), ("service.password", &self.password)] {
            if value.trim().is_empty() {
                exn::bail!(ErrorKind::Invalid(format!("{field} must be set")));
            }
        }
        Ok(())
    }
}

/// Request-rate limits applied during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay after every successful move, in milliseconds.
    pub move_delay_ms: u64,
    /// Moves per batch; a batch completion triggers the longer pause.
    pub batch_size: usize,
    /// Pause after each completed batch, in milliseconds.
    pub batch_pause_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { move_delay_ms: 1_000, batch_size: 10, batch_pause_ms: 5_000 }
    }
}

impl PacingConfig {
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub pacing: PacingConfig,
    /// Log-only mode: no mutating requests are issued.
    pub preview: bool,
    /// Sweep roots to reconcile, in order.
    pub folders: Vec<String>,
    /// Optional path to an external rules document merged over the built-in
    /// rule table.
    pub rules: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            pacing: PacingConfig::default(),
            preview: false,
            folders: default_folders(),
            rules: None,
        }
    }
}

/// The default sweep roots.
fn default_folders() -> Vec<String> {
    ["Gestures", "Body Parts", "Clothing", "Objects", "Scripts", "Settings", "Sounds"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Loads and validates configuration from the layered sources.
    ///
    /// `path` overrides the platform config-file lookup; a missing explicit
    /// file is an error, a missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let file = match path {
            Some(path) => {
                if !path.exists() {
                    exn::bail!(ErrorKind::Invalid(format!("config file not found: {}", path.display())));
                }
                Some(path.to_path_buf())
            },
            None => default_config_file(),
        };
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "merging config file");
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(file)),
                _ => figment.merge(Toml::file(file)),
            };
        }
        figment = figment.merge(Env::prefixed("SORTIE_").split("__"));

        let config: Config = figment.extract().or_raise(|| ErrorKind::Extract)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.pacing.batch_size == 0 {
            exn::bail!(ErrorKind::Invalid("pacing.batch_size must be nonzero".to_string()));
        }
        if self.folders.iter().all(|folder| folder.trim().is_empty()) {
            exn::bail!(ErrorKind::Invalid("folders must name at least one sweep root".to_string()));
        }
        Ok(())
    }
}

/// `config.toml` in the platform config directory, when it exists.
fn default_config_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "sortie")?;
    let file = dirs.config_dir().join("config.toml");
    file.exists().then_some(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pacing.batch_size, 10);
        assert_eq!(config.pacing.move_delay(), Duration::from_secs(1));
        assert_eq!(config.service.timeout(), Duration::from_secs(60));
        assert!(!config.preview);
        assert_eq!(config.folders.len(), 7);
        assert_eq!(config.folders[0], "Gestures");
        assert!(config.rules.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            preview = true
            folders = ["Inbox Zone"]

            [service]
            url = "http://localhost:8080/bridge"
            group = "sorters"
            password = "hunter2"

            [pacing]
            move_delay_ms = 250
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.preview);
        assert_eq!(config.folders, ["Inbox Zone"]);
        assert_eq!(config.service.url, "http://localhost:8080/bridge");
        assert_eq!(config.pacing.move_delay(), Duration::from_millis(250));
        // Unset keys keep their defaults.
        assert_eq!(config.pacing.batch_size, 10);
        config.service.require_complete().unwrap();
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rules": "/etc/sortie/rules.json", "pacing": {"batch_size": 3}}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.rules.as_deref(), Some(Path::new("/etc/sortie/rules.json")));
        assert_eq!(config.pacing.batch_size, 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let error = Config::load(Some(Path::new("/nonexistent/sortie.toml"))).unwrap_err();
        assert!(matches!(&*error, ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pacing]\nbatch_size = 0\n").unwrap();
        let error = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(&*error, ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_folder_list() {
        let mut config = Config::default();
        config.folders = vec![String::new()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_incomplete_service_config() {
        let config = Config::default();
        let error = config.service.require_complete().unwrap_err();
        assert!(matches!(&*error, ErrorKind::Invalid(_)));
    }
}
