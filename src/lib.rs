pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::AppConfig;

pub use adapters::{CsvRepository, InMemoryRepository, LocalStorage};
pub use crate::core::calculator::DoseCalculator;
pub use crate::core::converter::{convert, convert_dose, try_convert, ConversionError};
pub use domain::model::{DoseRequest, DoseResponse, Language};
pub use domain::units::{Area, AreaUnit, Dose, DoseUnit};
pub use utils::error::{DoseError, Result};
