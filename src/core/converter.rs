//! Dose conversion.
//!
//! A recommended per-acre dose is normalized to its canonical base
//! (`ml/acre` for volume, `grams/acre` for mass), scaled by the treated area
//! in acres, then expressed in the requested unit. Conversions across the
//! mass/volume boundary need a chemical density and are refused.

use crate::domain::units::{Area, AreaUnit, Dose, DoseUnit};
use thiserror::Error;

pub const UNSUPPORTED_CONVERSION_LABEL: &str = "Unsupported Unit Conversion";
pub const UNRECOGNIZED_AREA_UNIT_LABEL: &str = "Unrecognized Area Unit";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("unrecognized dose unit '{unit}'")]
    UnrecognizedSourceUnit { unit: String, desired: String },

    #[error("unrecognized area unit '{unit}'")]
    UnrecognizedAreaUnit { unit: String },

    #[error("cannot convert {from} to {to}")]
    UnsupportedConversion { from: String, to: String },
}

impl ConversionError {
    /// The text placed in the unit slot of a failed string-level conversion.
    pub fn label(&self) -> &str {
        match self {
            ConversionError::UnrecognizedSourceUnit { desired, .. } => desired,
            ConversionError::UnrecognizedAreaUnit { .. } => UNRECOGNIZED_AREA_UNIT_LABEL,
            ConversionError::UnsupportedConversion { .. } => UNSUPPORTED_CONVERSION_LABEL,
        }
    }
}

/// Divisor from a canonical unit to a target unit, `None` across bases.
fn divisor(canonical: DoseUnit, target: DoseUnit) -> Option<f64> {
    if canonical.basis() != target.basis() {
        return None;
    }
    let (_, factor) = target.canonical();
    Some(factor)
}

/// Total dose for `area`, expressed in `target`.
pub fn convert_dose(dose: Dose, area: Area, target: DoseUnit) -> Result<Dose, ConversionError> {
    let (canonical, factor) = dose.unit.canonical();
    let total = dose.value * factor * area.in_acres();

    let divisor =
        divisor(canonical, target).ok_or_else(|| ConversionError::UnsupportedConversion {
            from: dose.unit.to_string(),
            to: target.to_string(),
        })?;

    Ok(Dose::new(total / divisor, target))
}

/// Parses the three unit strings and runs [`convert_dose`].
///
/// Units are checked in order: recommended unit, area unit, desired unit.
pub fn try_convert(
    recommended_dose: f64,
    recommended_unit: &str,
    area: f64,
    area_unit: &str,
    desired_unit: &str,
) -> Result<Dose, ConversionError> {
    let source: DoseUnit = recommended_unit.parse().map_err(|_| {
        ConversionError::UnrecognizedSourceUnit {
            unit: recommended_unit.to_string(),
            desired: desired_unit.to_string(),
        }
    })?;
    let area_unit: AreaUnit = area_unit.parse().map_err(|_| {
        ConversionError::UnrecognizedAreaUnit {
            unit: area_unit.to_string(),
        }
    })?;
    let target: DoseUnit = desired_unit.parse().map_err(|_| {
        ConversionError::UnsupportedConversion {
            from: recommended_unit.to_string(),
            to: desired_unit.to_string(),
        }
    })?;

    convert_dose(
        Dose::new(recommended_dose, source),
        Area::new(area, area_unit),
        target,
    )
}

/// String-level conversion: `(Some(dose), desired_unit)` on success, with the
/// desired unit echoed as given, and `(None, label)` otherwise. Never panics.
pub fn convert(
    recommended_dose: f64,
    recommended_unit: &str,
    area: f64,
    area_unit: &str,
    desired_unit: &str,
) -> (Option<f64>, String) {
    match try_convert(
        recommended_dose,
        recommended_unit,
        area,
        area_unit,
        desired_unit,
    ) {
        Ok(dose) => (Some(dose.value), desired_unit.to_string()),
        Err(e) => (None, e.label().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_divisor_table() {
        assert_eq!(divisor(DoseUnit::MlPerAcre, DoseUnit::LiterPerAcre), Some(1000.0));
        assert_eq!(divisor(DoseUnit::GramsPerAcre, DoseUnit::GramsPerAcre), Some(1.0));
        assert_eq!(divisor(DoseUnit::GramsPerAcre, DoseUnit::MlPerAcre), None);
        assert_eq!(divisor(DoseUnit::MlPerAcre, DoseUnit::KgPerAcre), None);
        assert_eq!(divisor(DoseUnit::MlPerAcre, DoseUnit::MlPerAcre), Some(1.0));
        assert_eq!(divisor(DoseUnit::GramsPerAcre, DoseUnit::KgPerAcre), Some(1000.0));
    }

    #[test]
    fn test_liter_to_ml() {
        let dose = convert_dose(
            Dose::new(0.5, DoseUnit::LiterPerAcre),
            Area::new(1.0, AreaUnit::Acres),
            DoseUnit::MlPerAcre,
        )
        .unwrap();
        assert_eq!(dose, Dose::new(500.0, DoseUnit::MlPerAcre));
    }

    #[test]
    fn test_kg_over_hectares() {
        let dose = convert_dose(
            Dose::new(1.0, DoseUnit::KgPerAcre),
            Area::new(2.0, AreaUnit::Hectares),
            DoseUnit::GramsPerAcre,
        )
        .unwrap();
        assert!(approx(dose.value, 1000.0 * 2.0 * 2.47105));
    }

    #[test]
    fn test_cross_basis_refused() {
        let err = convert_dose(
            Dose::new(1.0, DoseUnit::LiterPerAcre),
            Area::new(1.0, AreaUnit::Acres),
            DoseUnit::KgPerAcre,
        )
        .unwrap_err();
        assert_eq!(err.label(), UNSUPPORTED_CONVERSION_LABEL);
    }

    #[test]
    fn test_unknown_source_echoes_desired_unit() {
        assert_eq!(
            convert(3.0, "oz/acre", 1.0, "hectares", "kg/acre"),
            (None, "kg/acre".to_string())
        );
    }

    #[test]
    fn test_unknown_source_checked_before_area() {
        assert_eq!(
            convert(3.0, "oz/acre", 1.0, "furlongs", "kg/acre"),
            (None, "kg/acre".to_string())
        );
    }

    #[test]
    fn test_unknown_area_unit_is_rejected() {
        assert_eq!(
            convert(3.0, "kg/acre", 1.0, "bigha", "kg/acre"),
            (None, UNRECOGNIZED_AREA_UNIT_LABEL.to_string())
        );
    }

    #[test]
    fn test_unknown_target_is_unsupported() {
        assert_eq!(
            convert(3.0, "kg/acre", 1.0, "acres", "tons/acre"),
            (None, UNSUPPORTED_CONVERSION_LABEL.to_string())
        );
    }

    #[test]
    fn test_output_unit_echoes_desired_spelling() {
        assert_eq!(
            convert(750.0, "Grams/Acre", 1.0, "ACRES", "KG/ACRE"),
            (Some(0.75), "KG/ACRE".to_string())
        );
        let typed = try_convert(750.0, "grams/acre", 1.0, "acres", "KG/ACRE").unwrap();
        assert_eq!(typed.unit, DoseUnit::KgPerAcre);
    }
}
