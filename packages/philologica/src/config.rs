//! Client configuration, stored as TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use philologica_ocr::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

use crate::progress::{ProgressSettings, MIN_TICK};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub ui: UiConfig,
}

/// Where the OCR service lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Hard deadline for one OCR request in seconds; 0 waits forever.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub language: String,
    pub engine: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            engine: "auto".to_string(),
        }
    }
}

/// Labels and timings of the upload panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub trigger_label: String,
    pub busy_label: String,
    pub progress_tick_ms: u64,
    pub progress_step: u8,
    pub progress_cap: u8,
    pub trigger_restore_delay_ms: u64,
    pub progress_reset_delay_ms: u64,
    pub notice_ttl_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            trigger_label: "Process image".to_string(),
            busy_label: "Processing...".to_string(),
            progress_tick_ms: 200,
            progress_step: 2,
            progress_cap: 90,
            trigger_restore_delay_ms: 500,
            progress_reset_delay_ms: 500,
            notice_ttl_secs: 10,
        }
    }
}

/// Runtime form of the upload settings the controller works with.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSettings {
    pub trigger_label: String,
    pub busy_label: String,
    pub progress: ProgressSettings,
    /// Delay between the outcome and re-enabling the trigger.
    pub trigger_restore_delay: Duration,
    /// Further delay before the progress bar is hidden and reset.
    pub progress_reset_delay: Duration,
    pub notice_ttl: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        ClientConfig::default().upload_settings()
    }
}

impl ClientConfig {
    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            trigger_label: self.ui.trigger_label.clone(),
            busy_label: self.ui.busy_label.clone(),
            progress: ProgressSettings {
                tick: Duration::from_millis(self.ui.progress_tick_ms).max(MIN_TICK),
                step: self.ui.progress_step,
                cap: self.ui.progress_cap.min(100),
            },
            trigger_restore_delay: Duration::from_millis(self.ui.trigger_restore_delay_ms),
            progress_reset_delay: Duration::from_millis(self.ui.progress_reset_delay_ms),
            notice_ttl: Duration::from_secs(self.ui.notice_ttl_secs),
            request_timeout: self.request_timeout(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.api.timeout_secs > 0).then(|| Duration::from_secs(self.api.timeout_secs))
    }
}

/// `config.toml` in the platform config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "philologica", "philologica").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: ClientConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &ClientConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Loads `explicit` if given; otherwise the default file when it exists, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ClientConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(ClientConfig::default()),
    }
}
