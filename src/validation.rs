//! Module for record validation logic.

use crate::data_models::ChangeRecord;

/// Validates a parsed chart-change record.
///
/// Checks:
/// - Coordinates, when present, are within valid degree ranges.
/// - A non-empty publication reference exists.
///
/// Returns Ok(()) if valid, otherwise Err(String) with the validation
/// error. Failures are diagnostics; the pipeline logs them and keeps the
/// record.
pub fn validate_record(record: &ChangeRecord) -> Result<(), String> {
    validate_coordinates(record.lat, record.lng)?;

    if record.published.is_empty() {
        return Err("Missing publication reference".to_string());
    }

    Ok(())
}

/// Checks optional coordinates against valid degree ranges.
pub fn validate_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), String> {
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("Latitude {} out of range (-90 to 90)", lat));
        }
    }
    if let Some(lng) = lng {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!("Longitude {} out of range (-180 to 180)", lng));
        }
    }
    if lat.is_some() != lng.is_some() {
        return Err("Only one of lat/lng is present".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_and_absent_coordinates_pass() {
        assert!(validate_coordinates(Some(37.8), Some(-122.4)).is_ok());
        assert!(validate_coordinates(None, None).is_ok());
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        assert!(validate_coordinates(Some(99.0), Some(-122.4)).is_err());
        assert!(validate_coordinates(Some(37.8), Some(-200.0)).is_err());
    }

    #[test]
    fn half_present_coordinates_fail() {
        assert!(validate_coordinates(Some(37.8), None).is_err());
        assert!(validate_coordinates(None, Some(-122.4)).is_err());
    }
}
