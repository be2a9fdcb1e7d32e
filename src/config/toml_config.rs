use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_SOURCE, DEFAULT_STORAGE_KEY};
use crate::utils::error::{Result, WaitlistError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_storage_key, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_STORAGE_PATH: &str = "./.waitlist";
pub const DEFAULT_SUCCESS_RESET_SECONDS: u64 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaitlistConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub form: FormConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_source")]
    pub default_source: String,
    pub success_reset_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            success_reset_seconds: None,
        }
    }
}

impl WaitlistConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            WaitlistError::config(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| WaitlistError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${WAITLIST_DIR})；未設定的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| WaitlistError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn success_reset_seconds(&self) -> u64 {
        self.form
            .success_reset_seconds
            .unwrap_or(DEFAULT_SUCCESS_RESET_SECONDS)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for WaitlistConfig {
    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }

    fn default_source(&self) -> &str {
        &self.form.default_source
    }

    fn success_reset(&self) -> Duration {
        Duration::from_secs(self.success_reset_seconds())
    }
}

impl Validate for WaitlistConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.path", &self.storage.path)?;
        validate_storage_key("storage.key", &self.storage.key)?;
        validate_non_empty_string("form.default_source", &self.form.default_source)?;
        validate_range(
            "form.success_reset_seconds",
            self.success_reset_seconds(),
            1,
            3600,
        )?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(WaitlistError::config(format!(
                    "logging.level: `{}` is not one of {}",
                    level,
                    valid_levels.join(", ")
                )));
            }
        }

        Ok(())
    }
}
