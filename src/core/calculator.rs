use crate::core::converter::{try_convert, ConversionError};
use crate::domain::model::{DoseRequest, DoseResponse, LocalizedName};
use crate::domain::ports::RecommendationRepository;
use crate::utils::error::{DoseError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};

const MISSING_INPUT_MESSAGE: &str = "Please select a crop, disease/pest, and enter the area.";

impl Validate for DoseRequest {
    fn validate(&self) -> Result<()> {
        let checks = validate_non_empty_string("crop_en", &self.crop_en)
            .and_then(|_| validate_non_empty_string("pest_disease_en", &self.pest_disease_en))
            .and_then(|_| validate_range("area", self.area, 0.0, f64::MAX));

        checks.map_err(|e| DoseError::ValidationError {
            message: format!("{} ({})", MISSING_INPUT_MESSAGE, e),
        })
    }
}

/// Looks up a recommendation and scales it to the requested area and unit.
pub struct DoseCalculator<R: RecommendationRepository> {
    repository: R,
}

impl<R: RecommendationRepository> DoseCalculator<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn crops(&self) -> Result<Vec<LocalizedName>> {
        self.repository.list_crops().await
    }

    pub async fn pests_for_crop(&self, crop_name_en: &str) -> Result<Vec<LocalizedName>> {
        self.repository.list_pests_for_crop(crop_name_en).await
    }

    /// Lookup misses and refused conversions come back as a response with
    /// `error` set; `Err` is reserved for invalid requests and repository
    /// failures.
    pub async fn calculate(&self, request: &DoseRequest) -> Result<DoseResponse> {
        request.validate()?;

        let Some(recommendation) = self
            .repository
            .find_recommendation(&request.crop_en, &request.pest_disease_en)
            .await?
        else {
            tracing::info!(
                "No recommendation for crop '{}' and pest/disease '{}'",
                request.crop_en,
                request.pest_disease_en
            );
            return Ok(DoseResponse::failure(format!(
                "No recommendation found for {} and {}",
                request.crop_en, request.pest_disease_en
            )));
        };

        tracing::debug!(
            "Recommendation: {} {} of {}",
            recommendation.recommended_dose,
            recommendation.unit,
            recommendation.chemical_name_en
        );

        let converted = try_convert(
            recommendation.recommended_dose,
            &recommendation.unit,
            request.area,
            &request.area_unit,
            &request.desired_output_unit,
        );

        match converted {
            Ok(dose) if !dose.value.is_finite() => {
                tracing::warn!("Dose for area {} {} overflowed", request.area, request.area_unit);
                Ok(DoseResponse::failure(format!(
                    "Calculated dose is out of range for an area of {} {}",
                    request.area, request.area_unit
                )))
            }
            Ok(dose) => Ok(DoseResponse {
                chemical: Some(recommendation.chemical_name(request.language).to_string()),
                calculated_dose: Some(dose.value),
                unit: Some(request.desired_output_unit.clone()),
                source: recommendation.source.clone(),
                error: None,
            }),
            Err(e) => {
                tracing::warn!("Dose conversion refused: {}", e);
                let message = match e {
                    ConversionError::UnrecognizedAreaUnit { unit } => {
                        format!("Unrecognized area unit {}", unit)
                    }
                    _ => format!(
                        "Unsupported unit conversion from {} to {}",
                        recommendation.unit, request.desired_output_unit
                    ),
                };
                Ok(DoseResponse::failure(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRepository;
    use crate::domain::model::Language;
    use crate::domain::reference::fixtures::rice_and_wheat;

    fn request(crop: &str, pest: &str, area: f64, area_unit: &str, unit: &str) -> DoseRequest {
        DoseRequest {
            crop_en: crop.to_string(),
            pest_disease_en: pest.to_string(),
            area,
            area_unit: area_unit.to_string(),
            desired_output_unit: unit.to_string(),
            language: Language::En,
        }
    }

    fn calculator() -> DoseCalculator<InMemoryRepository> {
        DoseCalculator::new(InMemoryRepository::new(rice_and_wheat()))
    }

    #[tokio::test]
    async fn test_calculate_success() {
        let response = calculator()
            .calculate(&request("Rice", "Stem Borer", 2.0, "acres", "ml/acre"))
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.chemical.as_deref(), Some("Chlorpyrifos"));
        assert_eq!(response.calculated_dose, Some(1000.0));
        assert_eq!(response.unit.as_deref(), Some("ml/acre"));
        assert_eq!(response.source.as_deref(), Some("Example Source 1"));
    }

    #[tokio::test]
    async fn test_calculate_uses_requested_language() {
        let mut req = request("Wheat", "Rust", 1.0, "acres", "kg/acre");
        req.language = Language::Hi;
        let response = calculator().calculate(&req).await.unwrap();
        assert_eq!(response.chemical.as_deref(), Some("मैन्कोजेब"));
        assert_eq!(response.calculated_dose, Some(0.75));
    }

    #[tokio::test]
    async fn test_no_recommendation() {
        let response = calculator()
            .calculate(&request("Rice", "Rust", 1.0, "acres", "ml/acre"))
            .await
            .unwrap();
        assert_eq!(
            response,
            DoseResponse::failure("No recommendation found for Rice and Rust")
        );
    }

    #[tokio::test]
    async fn test_cross_basis_conversion_reported() {
        let response = calculator()
            .calculate(&request("Wheat", "Rust", 1.0, "acres", "ml/acre"))
            .await
            .unwrap();
        assert_eq!(
            response.error.as_deref(),
            Some("Unsupported unit conversion from grams/acre to ml/acre")
        );
        assert_eq!(response.calculated_dose, None);
        assert_eq!(response.chemical, None);
    }

    #[tokio::test]
    async fn test_unknown_area_unit_reported() {
        let response = calculator()
            .calculate(&request("Wheat", "Rust", 1.0, "bigha", "kg/acre"))
            .await
            .unwrap();
        assert_eq!(response.error.as_deref(), Some("Unrecognized area unit bigha"));
    }

    #[tokio::test]
    async fn test_unit_echoes_request_spelling() {
        let response = calculator()
            .calculate(&request("Wheat", "Rust", 1.0, "Acres", "KG/ACRE"))
            .await
            .unwrap();
        assert_eq!(response.calculated_dose, Some(0.75));
        assert_eq!(response.unit.as_deref(), Some("KG/ACRE"));
    }

    #[tokio::test]
    async fn test_overflowing_dose_is_reported() {
        let response = calculator()
            .calculate(&request("Rice", "Stem Borer", 1e306, "acres", "liter/acre"))
            .await
            .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.calculated_dose, None);
        assert_eq!(response.chemical, None);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_request_is_error() {
        let err = calculator()
            .calculate(&request("", "Rust", 1.0, "acres", "kg/acre"))
            .await
            .unwrap_err();
        assert!(matches!(err, DoseError::ValidationError { .. }));

        let err = calculator()
            .calculate(&request("Wheat", "Rust", -3.0, "acres", "kg/acre"))
            .await
            .unwrap_err();
        assert!(err.user_friendly_message().starts_with(MISSING_INPUT_MESSAGE));
    }
}
