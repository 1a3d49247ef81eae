#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Language;
use crate::domain::units::{AreaUnit, DoseUnit};
use crate::utils::error::Result;
use crate::utils::validation::{validate_area_unit, validate_dose_unit, validate_path, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Fully resolved settings: built-in defaults, then the TOML file, then
/// command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: String,
    pub area_unit: AreaUnit,
    pub output_unit: DoseUnit,
    pub language: Language,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            area_unit: AreaUnit::Acres,
            output_unit: DoseUnit::LiterPerAcre,
            language: Language::En,
            log_level: None,
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let mut resolved = Self::default();
        if let Some(dir) = config.data_dir() {
            resolved.data_dir = dir.to_string();
        }

        let defaults = config.defaults();
        if let Some(unit) = &defaults.area_unit {
            resolved.area_unit = validate_area_unit("defaults.area_unit", unit)?;
        }
        if let Some(unit) = &defaults.output_unit {
            resolved.output_unit = validate_dose_unit("defaults.output_unit", unit)?;
        }
        if let Some(code) = &defaults.language {
            resolved.language = code.parse()?;
        }

        resolved.log_level = config.log_level().map(str::to_ascii_lowercase);
        resolved.log_json = config.log_json();
        Ok(resolved)
    }
}

impl ConfigProvider for AppConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn default_area_unit(&self) -> AreaUnit {
        self.area_unit
    }

    fn default_output_unit(&self) -> DoseUnit {
        self.output_unit
    }

    fn default_language(&self) -> Language {
        self.language
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)
    }
}
