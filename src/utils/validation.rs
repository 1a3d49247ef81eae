use crate::domain::units::{AreaUnit, DoseUnit};
use crate::utils::error::{DoseError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DoseError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment rather than exclusion.
    if !(value >= min && value <= max) {
        return Err(DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_dose_unit(field_name: &str, value: &str) -> Result<DoseUnit> {
    value
        .parse()
        .map_err(|_| DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Unsupported dose unit. Valid units: {}",
                DoseUnit::ALL.map(|u| u.as_str()).join(", ")
            ),
        })
}

pub fn validate_area_unit(field_name: &str, value: &str) -> Result<AreaUnit> {
    value
        .parse()
        .map_err(|_| DoseError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Unsupported area unit. Valid units: {}",
                AreaUnit::ALL.map(|u| u.as_str()).join(", ")
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.dir", "./data").is_ok());
        assert!(validate_path("data.dir", "").is_err());
        assert!(validate_path("data.dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("area", 2.5, 0.0, f64::MAX).is_ok());
        assert!(validate_range("area", -1.0, 0.0, f64::MAX).is_err());
        assert!(validate_range("area", f64::NAN, 0.0, f64::MAX).is_err());
        assert!(validate_range("area", f64::INFINITY, 0.0, f64::MAX).is_err());
    }

    #[test]
    fn test_validate_units() {
        assert_eq!(
            validate_dose_unit("defaults.output_unit", "KG/acre").unwrap(),
            DoseUnit::KgPerAcre
        );
        assert!(validate_area_unit("defaults.area_unit", "bigha").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        let absent: Option<u8> = None;
        assert!(matches!(
            validate_required_field("x", &absent),
            Err(DoseError::MissingConfigError { .. })
        ));
    }
}
