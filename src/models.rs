use serde::Serialize;

/// Parse an optional coordinate field: empty or malformed text becomes
/// `None` rather than rejecting the row.
pub fn parse_optional_float(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// One output CSV row. Field names follow the original report columns;
/// absent values serialize as empty fields.
#[derive(Debug, Serialize)]
pub struct OutputRow {
    pub id: usize,
    pub chart: String,
    pub action: String,
    pub item: String,
    pub label: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub doc: String,
    pub effective: Option<String>,
    #[serde(rename = "use")]
    pub use_flag: char,
    pub all_nearest_id: Option<usize>,
    pub all_dist_nmi: Option<f64>,
    pub all_azimuth: Option<f64>,
    pub use_nearest_id: Option<usize>,
    pub use_dist_nmi: Option<f64>,
    pub use_azimuth: Option<f64>,
}

impl From<&crate::data_models::ChangeRecord> for OutputRow {
    fn from(record: &crate::data_models::ChangeRecord) -> Self {
        Self {
            id: record.id,
            chart: record.chart.clone(),
            action: record.action.clone(),
            item: record.item.clone(),
            label: record.label.clone(),
            lat: record.lat,
            lng: record.lng,
            doc: record.published.clone(),
            effective: record.effective.clone(),
            use_flag: if record.use_flag { 'y' } else { 'n' },
            all_nearest_id: record.all_neighbor.map(|n| n.id),
            all_dist_nmi: record.all_neighbor.map(|n| n.dist_nmi),
            all_azimuth: record.all_neighbor.map(|n| n.azimuth),
            use_nearest_id: record.use_neighbor.map(|n| n.id),
            use_dist_nmi: record.use_neighbor.map(|n| n.dist_nmi),
            use_azimuth: record.use_neighbor.map(|n| n.azimuth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_float_tolerates_garbage() {
        assert_eq!(parse_optional_float("37.81"), Some(37.81));
        assert_eq!(parse_optional_float(" -122.35 "), Some(-122.35));
        assert_eq!(parse_optional_float(""), None);
        assert_eq!(parse_optional_float("   "), None);
        assert_eq!(parse_optional_float("N/A"), None);
    }
}
