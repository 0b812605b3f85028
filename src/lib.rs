//! Pipeline for Coast Guard Local Notice to Mariners chart-change data:
//! parse raw listing rows, normalize publication references into
//! effective-week identifiers, classify changes, and export the record
//! set for rendering.

pub mod classifier;
pub mod config;
pub mod data_models;
pub mod errors;
pub mod export;
pub mod file_processor;
pub mod geo;
pub mod metrics;
pub mod models;
pub mod parallel;
pub mod parsers;
pub mod pipeline;
pub mod resolver;
pub mod validation;
