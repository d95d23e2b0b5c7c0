//! Configuration
//!
//! ## Resolution
//!
//! 1. An explicit path (`--config`), which must exist
//! 2. The user override at `~/.config/axe/config.toml` (platform config dir)
//! 3. Embedded defaults compiled into the binary
//!
//! Keys missing from a file keep their default values and unknown keys are
//! ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aggregate::DEFAULT_DAILY_WINDOW;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/axe.toml");

/// Longest daily chart window; a month never has more days
const MAX_DAILY_WINDOW: u32 = 31;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Database file location
    pub db_path: PathBuf,
    pub user_id: i64,
    pub daily_window_days: u32,
    /// Symbol prefixed to amounts
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            user_id: 1,
            daily_window_days: DEFAULT_DAILY_WINDOW,
            currency: "$".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, else the user override, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                read_config(path)?
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }
}

/// User override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("axe").join("config.toml"))
}

/// Default database location
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("axe").join("axe.db"))
        .unwrap_or_else(|| PathBuf::from("axe.db"))
}

fn read_config(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Reading config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    storage: Option<RawStorage>,
    user: Option<RawUser>,
    analytics: Option<RawAnalytics>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawAnalytics {
    daily_window_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

/// Parse config from TOML content over the defaults
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(path) = raw.storage.and_then(|s| s.path) {
        config.db_path = expand_home(&path);
    }

    if let Some(id) = raw.user.and_then(|u| u.id) {
        config.user_id = id;
    }

    if let Some(days) = raw.analytics.and_then(|a| a.daily_window_days) {
        if days == 0 || days > MAX_DAILY_WINDOW {
            return Err(Error::Config(format!(
                "analytics.daily_window_days must be between 1 and {}, got {}",
                MAX_DAILY_WINDOW, days
            )));
        }
        config.daily_window_days = days;
    }

    if let Some(currency) = raw.display.and_then(|d| d.currency) {
        if !currency.trim().is_empty() {
            config.currency = currency;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.user_id, 1);
        assert_eq!(config.daily_window_days, 7);
        assert_eq!(config.currency, "$");
        assert_eq!(config.db_path, default_db_path());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
[display]
currency = "€"

[unknown]
ignored = true
"#,
        )
        .unwrap();
        assert_eq!(config.currency, "€");
        assert_eq!(config.user_id, 1);
        assert_eq!(config.daily_window_days, DEFAULT_DAILY_WINDOW);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            parse_config("[user\nid = "),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[analytics]\ndaily_window_days = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            parse_config("[analytics]\ndaily_window_days = 40"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[storage]\npath = \"/tmp/axe-test.db\"\n\n[user]\nid = 7\n\n[analytics]\ndaily_window_days = 14"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/axe-test.db"));
        assert_eq!(config.user_id, 7);
        assert_eq!(config.daily_window_days, 14);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/axe/config.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_expand_home_and_money() {
        assert_eq!(expand_home("/abs/path.db"), PathBuf::from("/abs/path.db"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/axe.db"), home.join("axe.db"));
        }

        let config = Config::default();
        assert_eq!(config.format_money(12.5), "$12.50");
    }
}
