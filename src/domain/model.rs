use crate::utils::error::DoseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub crop_id: i64,
    pub crop_name_en: String,
    pub crop_name_hi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestDisease {
    pub pest_disease_id: i64,
    pub pest_disease_name_en: String,
    pub pest_disease_name_hi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub chemical_id: i64,
    pub chemical_name_en: String,
    pub chemical_name_hi: String,
}

/// A row of the recommendation join table. `unit` is kept as text: it is
/// only interpreted by the converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation_id: i64,
    pub crop_id: i64,
    pub pest_disease_id: i64,
    pub chemical_id: i64,
    pub recommended_dose: f64,
    pub unit: String,
    pub source: Option<String>,
}

/// Recommendation joined with its chemical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDetail {
    pub chemical_name_en: String,
    pub chemical_name_hi: String,
    pub recommended_dose: f64,
    pub unit: String,
    pub source: Option<String>,
}

impl RecommendationDetail {
    pub fn chemical_name(&self, language: Language) -> &str {
        match language {
            Language::En => &self.chemical_name_en,
            Language::Hi => &self.chemical_name_hi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedName {
    pub name_en: String,
    pub name_hi: String,
}

impl From<&Crop> for LocalizedName {
    fn from(crop: &Crop) -> Self {
        Self {
            name_en: crop.crop_name_en.clone(),
            name_hi: crop.crop_name_hi.clone(),
        }
    }
}

impl From<&PestDisease> for LocalizedName {
    fn from(pest: &PestDisease) -> Self {
        Self {
            name_en: pest.pest_disease_name_en.clone(),
            name_hi: pest.pest_disease_name_hi.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            _ => Err(DoseError::UnsupportedLanguage {
                code: s.to_string(),
            }),
        }
    }
}

/// Input to a dose calculation, keyed by English names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseRequest {
    pub crop_en: String,
    pub pest_disease_en: String,
    pub area: f64,
    pub area_unit: String,
    pub desired_output_unit: String,
    #[serde(default)]
    pub language: Language,
}

/// Outcome of a dose calculation. Either `error` is set and every other
/// field is `None`, or `error` is `None` and the rest are filled in
/// (`source` may still be absent in the reference data).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoseResponse {
    pub chemical: Option<String>,
    pub calculated_dose: Option<f64>,
    pub unit: Option<String>,
    pub source: Option<String>,
    pub error: Option<String>,
}

impl DoseResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for DoseResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "Error: {}", error);
        }
        let dose = self
            .calculated_dose
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "N/A".to_string());
        writeln!(
            f,
            "Recommended Chemical: {}",
            self.chemical.as_deref().unwrap_or("N/A")
        )?;
        writeln!(
            f,
            "Calculated Dose: {} {}",
            dose,
            self.unit.as_deref().unwrap_or("")
        )?;
        write!(f, "Source: {}", self.source.as_deref().unwrap_or("N/A"))
    }
}
