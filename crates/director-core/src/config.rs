use crate::error::{DirectorError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const SLOW_TICK_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Delay between timeline steps.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How many file names the task card lists before "+N more files".
    #[serde(default = "default_file_preview_limit")]
    pub file_preview_limit: usize,
    /// Address shown in the simulated browser's location bar.
    #[serde(default = "default_browser_url")]
    pub browser_url: String,
}

fn default_version() -> u32 {
    1
}

fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_file_preview_limit() -> usize {
    3
}

fn default_browser_url() -> String {
    "https://example.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            tick_interval_ms: default_tick_interval_ms(),
            file_preview_limit: default_file_preview_limit(),
            browser_url: default_browser_url(),
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Load `.director/config.yaml` under `root`, or defaults when the file
    /// does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Write the defaults if no config exists yet. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(&Self::default())?;
        crate::io::write_if_missing(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.tick_interval_ms == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "tick_interval_ms must be greater than 0".to_string(),
            });
        } else if self.tick_interval_ms > SLOW_TICK_MS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "tick_interval_ms={} (over {}s per step is unusual)",
                    self.tick_interval_ms,
                    SLOW_TICK_MS / 1000
                ),
            });
        }

        if self.file_preview_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "file_preview_limit is 0: no file names will be listed".to_string(),
            });
        }

        if self.browser_url.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "browser_url is empty".to_string(),
            });
        }

        warnings
    }

    /// Fail on the first error-level warning.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(DirectorError::InvalidConfig(w.message)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
