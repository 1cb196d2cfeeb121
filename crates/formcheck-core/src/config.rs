//! Configuration management for formcheck.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The target URL, browser executable and
//! submitted record all live here.

use crate::error::{ConfigError, ConfigResult};
use crate::types::ExpectedRecord;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FORMCHECK_CONFIG";

/// Main application configuration.
///
/// Loaded from `~/.config/formcheck/config.toml` (or platform equivalent),
/// or from the file named by `FORMCHECK_CONFIG`.
/// If no file exists, default values are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Start page of the site under test
    pub base_url: String,
    /// Browser executable; auto-detected when unset
    pub driver_path: Option<PathBuf>,
    /// Values to submit and expect back
    pub record: ExpectedRecord,
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Bounded wait settings
    pub wait: WaitConfig,
    /// Verification settings
    pub verify: VerifyConfig,
    /// Viewport scroll settings
    pub scroll: ScrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://demoqa.com/".to_string(),
            driver_path: None,
            record: ExpectedRecord::default(),
            browser: BrowserConfig::default(),
            wait: WaitConfig::default(),
            verify: VerifyConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the XDG path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// `FORMCHECK_CONFIG` selects the file; see [`AppConfig::apply_env`]
    /// for the per-value overrides.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from(Path::new(&path))?,
            None => Self::load()?,
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save configuration to the XDG path.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| ConfigError::invalid("config_path", "no parent directory"))?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Supports the following variables:
    /// - `FORMCHECK_BASE_URL`: Override the start page
    /// - `FORMCHECK_DRIVER_PATH`: Override the browser executable
    /// - `FORMCHECK_HEADLESS`: Override browser headless mode (true/false)
    /// - `FORMCHECK_WAIT_TIMEOUT_SECS`: Override the clickable wait timeout
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("FORMCHECK_BASE_URL") {
            tracing::debug!("Override base_url from env: {}", val);
            self.base_url = val;
        }

        if let Some(val) = lookup("FORMCHECK_DRIVER_PATH") {
            tracing::debug!("Override driver_path from env: {}", val);
            self.driver_path = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("FORMCHECK_HEADLESS") {
            match val.parse() {
                Ok(headless) => {
                    self.browser.headless = headless;
                    tracing::debug!("Override browser.headless from env: {}", headless);
                }
                Err(_) => tracing::debug!("Ignoring unparsable FORMCHECK_HEADLESS={}", val),
            }
        }

        if let Some(val) = lookup("FORMCHECK_WAIT_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => {
                    self.wait.clickable_timeout_secs = secs;
                    tracing::debug!("Override wait.clickable_timeout_secs from env: {}", secs);
                }
                Err(_) => {
                    tracing::debug!("Ignoring unparsable FORMCHECK_WAIT_TIMEOUT_SECS={}", val);
                }
            }
        }
    }

    /// Reject configurations the check cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(ConfigError::invalid(
                "browser.window_width/window_height",
                "window dimensions must be non-zero",
            ));
        }

        if self.wait.poll_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "wait.poll_interval_ms",
                "must be greater than zero",
            ));
        }

        self.record.validate()
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/formcheck/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("org", "formcheck", "formcheck").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Pass `--no-sandbox` (needed in most containers)
    pub no_sandbox: bool,
    /// Per-request DevTools timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            no_sandbox: true,
            request_timeout_secs: 30,
        }
    }
}

impl BrowserConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Bounded wait settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// How long to wait for an element to become clickable
    pub clickable_timeout_secs: u64,
    /// Delay between probes
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            clickable_timeout_secs: 10,
            poll_interval_ms: 500,
        }
    }
}

impl WaitConfig {
    /// Clickable timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.clickable_timeout_secs)
    }

    /// Poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// How echoed text is turned into a comparable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Strip a leading `Label:` prefix, then trim
    #[default]
    LabelStripped,
    /// Compare the trimmed text as-is
    RawText,
}

/// Verification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Extraction strategy for echoed values
    pub extractor: ExtractorKind,
}

/// Viewport scroll settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Vertical scroll distance in pixels before interacting
    pub offset_px: i64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { offset_px: 300 }
    }
}
