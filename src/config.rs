//! Application configuration.
//!
//! Settings are read from a TOML file and/or environment variables, with
//! sensible defaults for local development. Environment variables win over
//! file values so deployments can override a checked-in config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardSettings,
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
}

/// Token and password-hashing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret for token signing. Must be overridden in production.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in days; expired tokens require re-login.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// bcrypt work factor.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

/// Leaderboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    /// Number of accounts returned by the leaderboard query.
    #[serde(default = "default_leaderboard_limit")]
    pub limit: usize,
}

/// First-run bootstrap settings (default administrator account).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapSettings {
    #[serde(default = "default_admin_id")]
    pub default_admin_id: String,
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
    #[serde(default = "default_admin_name")]
    pub default_admin_name: String,
}

fn default_jwt_secret() -> String {
    "dev-only-secret".to_string()
}

fn default_token_ttl_days() -> i64 {
    7
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_leaderboard_limit() -> usize {
    10
}

fn default_admin_id() -> String {
    "admin123".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_admin_name() -> String {
    "Default Admin".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_days: default_token_ttl_days(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            limit: default_leaderboard_limit(),
        }
    }
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            default_admin_id: default_admin_id(),
            default_admin_password: default_admin_password(),
            default_admin_name: default_admin_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthSettings::default(),
            leaderboard: LeaderboardSettings::default(),
            bootstrap: BootstrapSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(RepositoryError::ConfigurationError)` if the file cannot be
    ///   read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let mut config: AppConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("GREENQUEST_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(days) = std::env::var("GREENQUEST_TOKEN_TTL_DAYS") {
            if let Ok(days) = days.parse() {
                self.auth.token_ttl_days = days;
            }
        }
        if let Ok(limit) = std::env::var("GREENQUEST_LEADERBOARD_LIMIT") {
            if let Ok(limit) = limit.parse() {
                self.leaderboard.limit = limit;
            }
        }
        if let Ok(password) = std::env::var("GREENQUEST_DEFAULT_ADMIN_PASSWORD") {
            self.bootstrap.default_admin_password = password;
        }
    }
}
