use crate::config::FileConfig;
use crate::data_models::ChangeRecord;
use crate::errors::PipelineError;
use crate::parsers;
use log::info;

/// Processes a single listing file based on its configuration.
/// Selects the appropriate parser and returns the raw records or an error.
pub fn process_file(config_entry: &FileConfig) -> Result<Vec<ChangeRecord>, PipelineError> {
    info!(
        "Processing file: {} with format type: {}",
        config_entry.path.display(),
        config_entry.format_type
    );

    match config_entry.format_type.as_str() {
        // Tab-delimited NOAA listing export, or the same layout re-exported
        // as a delimited file with a configured delimiter.
        "NoaaListing" | "CSV" => parsers::listing::parse_listing(config_entry, &config_entry.path)
            .map_err(|parse_err| PipelineError::Parse(parse_err, config_entry.path.clone())),

        unsupported_format => Err(PipelineError::UnsupportedFormat {
            format_type: unsupported_format.to_string(),
            path: config_entry.path.clone(),
        }),
    }
}
