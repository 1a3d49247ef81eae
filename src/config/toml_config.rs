use crate::domain::model::Language;
use crate::utils::error::{DoseError, Result};
use crate::utils::validation::{
    validate_area_unit, validate_dose_unit, validate_path, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: Option<DataConfig>,
    pub defaults: Option<DefaultsConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub area_unit: Option<String>,
    pub output_unit: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DoseError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DoseError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoseError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.dir.as_deref())
    }

    pub fn defaults(&self) -> DefaultsConfig {
        self.defaults.clone().unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(data) = &self.data {
            let dir = validate_required_field("data.dir", &data.dir)?;
            validate_path("data.dir", dir)?;
        }

        let defaults = self.defaults();
        if let Some(unit) = &defaults.area_unit {
            validate_area_unit("defaults.area_unit", unit)?;
        }
        if let Some(unit) = &defaults.output_unit {
            validate_dose_unit("defaults.output_unit", unit)?;
        }
        if let Some(code) = &defaults.language {
            code.parse::<Language>()
                .map_err(|_| DoseError::InvalidConfigValueError {
                    field: "defaults.language".to_string(),
                    value: code.clone(),
                    reason: "Valid languages: en, hi".to_string(),
                })?;
        }

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(DoseError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
