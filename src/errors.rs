use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse JSON configuration in {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Configuration file not found at {path}")]
    NotFound { path: PathBuf },
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration loading failed: {0}")]
    Config(String),
    #[error("Configuration parsing failed: {0}")]
    ConfigParse(#[from] ConfigError),
    #[error("Parsing failed for {1}: {0}")]
    Parse(ParseError, PathBuf),
    #[error("Unsupported format type '{format_type}' for file {path}")]
    UnsupportedFormat { format_type: String, path: PathBuf },
    #[error("Input discovery failed under {path}: {source}")]
    InputDiscovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Failed to write output file {path}: {source}")]
    ExportError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("IO error writing {path}: {source}")]
    ExportIoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading data file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading listing headers in {path}: {source}")]
    HeaderReadError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Header mismatch in {path}: expected '{expected}' at column {column}, found '{found}'")]
    HeaderMismatch {
        path: PathBuf,
        column: usize,
        expected: String,
        found: String,
    },
    #[error("Listing in {path} is truncated: {message}")]
    Truncated { path: PathBuf, message: String },
}
