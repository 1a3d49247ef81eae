use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::domain::model::Language;
use crate::utils::error::Result;
use crate::utils::validation::{validate_area_unit, validate_dose_unit, validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "pesticide-dose")]
#[command(about = "Look up pesticide recommendations and scale the dose to your field")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding crops.csv, pests_diseases.csv, chemicals.csv and recommendations.csv
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List crops in the reference data
    Crops,
    /// List pests and diseases with a recommendation for a crop
    Pests {
        /// Crop name in English
        #[arg(long)]
        crop: String,
    },
    /// Calculate the dose of the recommended chemical for a field
    Calculate {
        /// Crop name in English
        #[arg(long)]
        crop: String,
        /// Pest or disease name in English
        #[arg(long)]
        pest: String,
        /// Field size
        #[arg(long)]
        area: f64,
        /// acres or hectares
        #[arg(long)]
        area_unit: Option<String>,
        /// liter/acre, ml/acre, kg/acre or grams/acre
        #[arg(long)]
        unit: Option<String>,
        /// en or hi
        #[arg(long)]
        language: Option<String>,
    },
    /// List supported dose and area units
    Units,
}

impl CliConfig {
    /// Merges built-in defaults, the optional TOML file and command line flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_toml(&TomlConfig::from_file(path)?)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if self.log_json {
            config.log_json = true;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("config", path)?;
        }
        if let Some(dir) = &self.data_dir {
            validate_path("data_dir", dir)?;
        }
        if let Command::Calculate {
            area_unit,
            unit,
            language,
            ..
        } = &self.command
        {
            if let Some(area_unit) = area_unit {
                validate_area_unit("area_unit", area_unit)?;
            }
            if let Some(unit) = unit {
                validate_dose_unit("unit", unit)?;
            }
            if let Some(code) = language {
                code.parse::<Language>()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_calculate() {
        let cli = CliConfig::parse_from([
            "pesticide-dose",
            "--data-dir",
            "/tmp/ref",
            "calculate",
            "--crop",
            "Rice",
            "--pest",
            "Stem Borer",
            "--area",
            "2.5",
            "--unit",
            "ml/acre",
        ]);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/ref"));
        match &cli.command {
            Command::Calculate {
                crop, area, unit, ..
            } => {
                assert_eq!(crop, "Rice");
                assert_eq!(*area, 2.5);
                assert_eq!(unit.as_deref(), Some("ml/acre"));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_units() {
        let cli = CliConfig::parse_from([
            "pesticide-dose",
            "calculate",
            "--crop",
            "Rice",
            "--pest",
            "Stem Borer",
            "--area",
            "1",
            "--area-unit",
            "bigha",
        ]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[data]\ndir = \"/from/file\"\n\n[defaults]\noutput_unit = \"kg/acre\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "pesticide-dose",
            "--config",
            file.path().to_str().unwrap(),
            "--data-dir",
            "/from/flag",
            "crops",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_dir, "/from/flag");
        assert_eq!(config.output_unit, crate::domain::units::DoseUnit::KgPerAcre);
    }
}
