use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::retry::RetryPolicy;

/// Environment variable overriding `general.database_path`.
pub const DATABASE_URL_ENV: &str = "OPENDOORS_DATABASE_URL";

/// Longest reward lifetime `validate` accepts.
pub const MAX_REWARD_EXPIRY_DAYS: i64 = 3650;

/// Environment variable overriding `general.log_level`.
pub const LOG_LEVEL_ENV: &str = "OPENDOORS_LOG_LEVEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub ledger: LedgerConfig,

    pub retry: RetryConfig,

    pub history: HistoryConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/opendoors.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Days until a granted door reward expires.
    pub reward_expiry_days: i64,

    /// Used when the distributor's name cannot be resolved.
    pub unknown_distributor_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reward_expiry_days: 30,
            unknown_distributor_name: "Unknown Distributor".to_string(),
        }
    }
}

/// Backoff applied to read-only profile fetches. Writes are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles each attempt after that.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many recent game plays a user's history shows.
    pub recent_game_plays: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_game_plays: 20,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Applies environment overrides through `lookup` so callers (and tests)
    /// decide where values come from.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.general.database_path = url;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.general.log_level = level;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("opendoors").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".opendoors").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        Self::create_default_at(&Self::default_config_path())
    }

    /// Writes the default config to `path` unless a file is already there.
    /// An existing file is left alone without being parsed.
    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database URL cannot be empty (set {DATABASE_URL_ENV} or general.database_path)");
        }

        if self.retry.max_attempts == 0 {
            anyhow::bail!("retry.max_attempts must be at least 1");
        }

        if !(1..=MAX_REWARD_EXPIRY_DAYS).contains(&self.ledger.reward_expiry_days) {
            anyhow::bail!(
                "ledger.reward_expiry_days must be between 1 and {MAX_REWARD_EXPIRY_DAYS}"
            );
        }

        if self.history.recent_game_plays == 0 {
            anyhow::bail!("history.recent_game_plays must be at least 1");
        }

        Ok(())
    }
}
