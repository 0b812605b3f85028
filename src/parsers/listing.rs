use crate::config::FileConfig;
use crate::data_models::ChangeRecord;
use crate::errors::ParseError;
use crate::models::parse_optional_float;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Column layout of the NOAA chart-listing export. Columns 4 and 5
// (Latitude/Longitude in DMS) are ignored; the decimal-degree columns
// are used instead.
const COL_CHART: usize = 0;
const COL_ACTION: usize = 1;
const COL_ITEM: usize = 2;
const COL_LABEL: usize = 3;
const COL_LAT_DD: usize = 6;
const COL_LNG_DD: usize = 7;
const COL_PUBLISHED: usize = 8;

const EXPECTED_HEADERS: [(usize, &str); 7] = [
    (COL_CHART, "Chart"),
    (COL_ACTION, "Action"),
    (COL_ITEM, "Item Name"),
    (COL_LABEL, "Charting Label"),
    (COL_LAT_DD, "LatDD"),
    (COL_LNG_DD, "LongDD"),
    (COL_PUBLISHED, "Published Document"),
];

/// Parses one chart-listing file into raw `ChangeRecord`s, in input
/// order. Derived fields are left at their defaults; the pipeline fills
/// them in a later pass.
pub fn parse_listing(config: &FileConfig, file_path: &Path) -> Result<Vec<ChangeRecord>, ParseError> {
    let file = File::open(file_path).map_err(|e| ParseError::IoError {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    parse_listing_from_reader(config, file, file_path)
}

/// Reader-based variant so tests can parse in-memory listings.
pub fn parse_listing_from_reader<R: Read>(
    config: &FileConfig,
    reader: R,
    file_path: &Path,
) -> Result<Vec<ChangeRecord>, ParseError> {
    let delimiter = config.delimiter_byte();

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        // The listing export is plain delimited text without quoting;
        // stray quote characters in item names must pass through.
        .quoting(delimiter != b'\t')
        .from_reader(reader);

    // Skip preamble lines (the export opens with a note about the latest
    // chart edition) before the header row.
    let mut record = StringRecord::new();
    for i in 0..config.preamble_rows {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => {
                return Err(ParseError::Truncated {
                    path: file_path.to_path_buf(),
                    message: format!(
                        "end of file while skipping preamble row {}/{}",
                        i + 1,
                        config.preamble_rows
                    ),
                });
            }
            Err(e) => {
                return Err(ParseError::HeaderReadError {
                    path: file_path.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    // Header row, sanity-checked against the expected column layout so a
    // silently reordered export fails this file rather than producing
    // garbage records.
    let header = match reader.read_record(&mut record) {
        Ok(true) => record.clone(),
        Ok(false) => {
            return Err(ParseError::Truncated {
                path: file_path.to_path_buf(),
                message: "end of file before header row".to_string(),
            });
        }
        Err(e) => {
            return Err(ParseError::HeaderReadError {
                path: file_path.to_path_buf(),
                source: e,
            });
        }
    };

    for (column, expected) in EXPECTED_HEADERS {
        let found = header.get(column).unwrap_or("").trim();
        if found != expected {
            return Err(ParseError::HeaderMismatch {
                path: file_path.to_path_buf(),
                column,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        // Preamble + header precede the data rows.
        let file_row_num = config.preamble_rows + 2 + row_index;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "Failed to read row {} in {}: {}. Row skipped.",
                    file_row_num,
                    file_path.display(),
                    e
                );
                continue;
            }
        };

        if row.len() < header.len() {
            debug!(
                "Skipping short row {} in {} ({} of {} fields)",
                file_row_num,
                file_path.display(),
                row.len(),
                header.len()
            );
            continue;
        }

        let field = |index: usize| row.get(index).unwrap_or("").trim();

        let chart = match &config.chart {
            Some(chart) => chart.clone(),
            None => field(COL_CHART).to_string(),
        };

        records.push(ChangeRecord {
            chart,
            action: field(COL_ACTION).to_lowercase(),
            item: field(COL_ITEM).to_string(),
            label: field(COL_LABEL).to_string(),
            lat: parse_optional_float(field(COL_LAT_DD)),
            lng: parse_optional_float(field(COL_LNG_DD)),
            published: field(COL_PUBLISHED).to_string(),
            ..ChangeRecord::default()
        });
    }

    debug!(
        "Parsed {} records from {}",
        records.len(),
        file_path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tab_config() -> FileConfig {
        serde_json::from_str(r#"{"path": "listing_18650.txt"}"#).unwrap()
    }

    fn sample_listing() -> String {
        [
            "The latest edition of chart 18650 is 48, published 2017.",
            "Chart\tAction\tItem Name\tCharting Label\tLat\tLong\tLatDD\tLongDD\tPublished Document",
            "18650\tAdd\tLighted Buoy 2\tFl G 4s\t37-48.9N\t122-21.1W\t37.815\t-122.352\tLNM 08/11, 11th Dist",
            "18650\tDelete\tMooring ball\tNONE\t37-49.0N\t122-21.0W\t37.817\t-122.350\tLNM 12/13, 11th Dist",
            "short row",
            "18650\tRelocate\tDaybeacon\tR \"2\"\t\t\t\t\tgarbage text",
        ]
        .join("\r\n")
    }

    #[test]
    fn parses_rows_in_input_order() {
        let records = parse_listing_from_reader(
            &tab_config(),
            sample_listing().as_bytes(),
            &PathBuf::from("test.txt"),
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].item, "Lighted Buoy 2");
        assert_eq!(records[0].action, "add");
        assert_eq!(records[0].lat, Some(37.815));
        assert_eq!(records[0].lng, Some(-122.352));
        assert_eq!(records[1].action, "delete");
        assert_eq!(records[2].action, "relocate");
    }

    #[test]
    fn short_rows_are_skipped_not_fatal() {
        let records = parse_listing_from_reader(
            &tab_config(),
            sample_listing().as_bytes(),
            &PathBuf::from("test.txt"),
        )
        .unwrap();
        assert!(records.iter().all(|r| r.item != "short row"));
    }

    #[test]
    fn missing_coordinates_become_absent() {
        let records = parse_listing_from_reader(
            &tab_config(),
            sample_listing().as_bytes(),
            &PathBuf::from("test.txt"),
        )
        .unwrap();
        let relocate = &records[2];
        assert_eq!(relocate.lat, None);
        assert_eq!(relocate.lng, None);
        assert_eq!(relocate.published, "garbage text");
    }

    #[test]
    fn chart_override_from_config_wins() {
        let config: FileConfig =
            serde_json::from_str(r#"{"path": "x.txt", "chart": "18653"}"#).unwrap();
        let records = parse_listing_from_reader(
            &config,
            sample_listing().as_bytes(),
            &PathBuf::from("test.txt"),
        )
        .unwrap();
        assert!(records.iter().all(|r| r.chart == "18653"));
    }

    #[test]
    fn header_mismatch_fails_the_file() {
        let listing = [
            "preamble",
            "Chart\tAction\tItem Name\tCharting Label\tLat\tLong\tLatDD\tLongDD\tSomething Else",
            "18650\tAdd\tBuoy\tFl G\t\t\t37.8\t-122.3\tLNM 08/11, 11th Dist",
        ]
        .join("\r\n");

        let err = parse_listing_from_reader(
            &tab_config(),
            listing.as_bytes(),
            &PathBuf::from("test.txt"),
        )
        .unwrap_err();
        match err {
            ParseError::HeaderMismatch { column, expected, .. } => {
                assert_eq!(column, 8);
                assert_eq!(expected, "Published Document");
            }
            other => panic!("expected HeaderMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_truncated() {
        let err = parse_listing_from_reader(
            &tab_config(),
            &b""[..],
            &PathBuf::from("empty.txt"),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Truncated { .. }));
    }
}
