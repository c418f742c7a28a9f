//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use punch_core::DEFAULT_TARGET_HOURS;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the time-entry API.
    pub api_url: String,
    /// Bearer credential for the API. Issued by the auth service.
    pub token: String,
    /// Location attached to clock-ins when `--location` is not given.
    pub default_location: Option<String>,
    /// Daily target used for the progress indicator.
    pub target_hours: f32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("default_location", &self.default_location)
            .field("target_hours", &self.target_hours)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            token: String::new(),
            default_location: None,
            target_hours: DEFAULT_TARGET_HOURS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Merge order: defaults, then `<config dir>/punch/config.toml`, then
    /// the explicit file, then `PUNCH_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PUNCH_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for punch.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punch"))
}
