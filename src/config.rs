use crate::errors::ConfigError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Configuration for one input listing file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileConfig {
    pub path: PathBuf,
    /// Chart code this listing belongs to, e.g. "18650". When absent the
    /// parser trusts the per-row chart column instead.
    #[serde(default)]
    pub chart: Option<String>,
    #[serde(default = "default_format_type")]
    pub format_type: String,
    /// Field delimiter; NOAA listing exports are tab-delimited.
    #[serde(default)]
    pub delimiter: Option<String>,
    /// Non-data lines before the header row (the listing starts with a
    /// note about the latest chart edition).
    #[serde(default = "default_preamble_rows")]
    pub preamble_rows: usize,
}

fn default_format_type() -> String {
    "NoaaListing".to_string()
}

fn default_preamble_rows() -> usize {
    1
}

impl FileConfig {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter
            .as_deref()
            .unwrap_or("\t")
            .chars()
            .next()
            .unwrap_or('\t') as u8
    }
}

/// Top-level pipeline configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PipelineConfig {
    #[serde(default)]
    pub inputs: Vec<FileConfig>,
    /// Directory scanned for listing files when `inputs` is empty.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    #[serde(default = "default_output_all")]
    pub output_all: PathBuf,
    #[serde(default = "default_output_best")]
    pub output_best: PathBuf,
    /// Fixed reference time (RFC 3339) for the future-year guard; when
    /// absent the pipeline samples the wall clock once at startup.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    /// Shortlist spacing threshold in meters.
    #[serde(default = "default_min_spacing_m")]
    pub min_spacing_m: f64,
}

fn default_output_all() -> PathBuf {
    PathBuf::from("lnms.csv")
}

fn default_output_best() -> PathBuf {
    PathBuf::from("lnms_best.csv")
}

fn default_min_spacing_m() -> f64 {
    10.0
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            input_dir: None,
            output_all: default_output_all(),
            output_best: default_output_best(),
            reference_time: None,
            min_spacing_m: default_min_spacing_m(),
        }
    }
}

/// Loads the pipeline configuration from a JSON file.
pub fn load_config(path_str: &str) -> Result<PipelineConfig, ConfigError> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(ConfigError::NotFound { path });
    }

    let file = File::open(&path).map_err(|e| ConfigError::IoError {
        path: path.clone(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let config: PipelineConfig =
        serde_json::from_reader(reader).map_err(|e| ConfigError::JsonParseError {
            path: path.clone(),
            source: e,
        })?;

    if config.min_spacing_m < 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "min_spacing_m".to_string(),
            message: format!("must be non-negative, got {}", config.min_spacing_m),
        });
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_defaults_to_tab_delimiter() {
        let config: FileConfig =
            serde_json::from_str(r#"{"path": "listing_18650.txt"}"#).unwrap();
        assert_eq!(config.delimiter_byte(), b'\t');
        assert_eq!(config.preamble_rows, 1);
        assert_eq!(config.format_type, "NoaaListing");
    }

    #[test]
    fn pipeline_config_fills_output_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"inputs": []}"#).unwrap();
        assert_eq!(config.output_all, PathBuf::from("lnms.csv"));
        assert_eq!(config.output_best, PathBuf::from("lnms_best.csv"));
        assert!(config.reference_time.is_none());
        assert_eq!(config.min_spacing_m, 10.0);
    }
}
