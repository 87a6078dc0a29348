use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_PLACE: &str = "Bucharest";

pub const ENV_API_KEY: &str = "WEATHERVIEW_API_KEY";
pub const ENV_PLACE: &str = "WEATHERVIEW_PLACE";

/// How completions of overlapping requests are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Whichever completion lands last is shown, even if it belongs to an
    /// older request.
    #[default]
    LastResolved,
    /// Completions of requests older than the newest issued one are dropped.
    LatestIssued,
}

/// Durations of the cosmetic and transient UI signals, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub reveal_delay_ms: u64,
    pub error_ttl_ms: u64,
    pub shake_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self { reveal_delay_ms: 1500, error_ttl_ms: 2000, shake_ms: 500 }
    }
}

impl Timings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn error_ttl(&self) -> Duration {
        Duration::from_millis(self.error_ttl_ms)
    }

    pub fn shake(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_place = "Bucharest"
/// ordering = "last-resolved"
///
/// [timings]
/// reveal_delay_ms = 1500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather access credential.
    pub api_key: Option<String>,

    /// Place looked up on startup.
    pub default_place: String,

    pub ordering: ResponseOrdering,

    pub timings: Timings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_place: DEFAULT_PLACE.to_string(),
            ordering: ResponseOrdering::default(),
            timings: Timings::default(),
        }
    }
}

impl Config {
    /// Return the API key, or an error pointing at `weatherview configure`.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weatherview configure` or set {ENV_API_KEY}."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Path to the log file written while the terminal view owns the screen.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().join("weatherview.log"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Apply `WEATHERVIEW_API_KEY` / `WEATHERVIEW_PLACE` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(place) = lookup(ENV_PLACE).filter(|v| !v.trim().is_empty()) {
            self.default_place = place;
        }
        self
    }
}
