use crate::config::FileConfig;
use crate::data_models::ChangeRecord;
use crate::file_processor;
use crate::metrics::METRICS;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Result of processing a single listing file
#[derive(Debug)]
pub struct FileProcessResult {
    pub config_index: usize,
    pub file_path: String,
    pub records: Vec<ChangeRecord>,
    pub error: Option<String>,
    #[allow(dead_code)]
    pub processing_time_ms: u128,
}

/// Parallel listing processor using Rayon
pub struct ParallelProcessor {
    #[allow(dead_code)]
    num_workers: usize,
}

impl ParallelProcessor {
    pub fn new() -> Self {
        let num_workers = num_cpus::get();
        info!("Initializing ParallelProcessor with {} workers", num_workers);
        Self { num_workers }
    }

    /// Process multiple file configs in parallel. Results come back sorted
    /// by config index so record order stays deterministic regardless of
    /// worker scheduling.
    pub fn process_files(&self, configs: Vec<FileConfig>) -> Vec<FileProcessResult> {
        let total_files = configs.len();
        info!("Starting parallel processing of {} files", total_files);

        let progress = Arc::new(ProgressBar::new(total_files as u64));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut results: Vec<FileProcessResult> = configs
            .into_par_iter()
            .enumerate()
            .map(|(index, config)| {
                let start = Instant::now();
                let file_path = config.path.to_string_lossy().to_string();
                let progress_clone = Arc::clone(&progress);

                METRICS.lock().record_file_attempt();

                let result = match file_processor::process_file(&config) {
                    Ok(records) => {
                        let processing_time = start.elapsed().as_millis();
                        info!(
                            "Successfully parsed {} records from {} in {}ms",
                            records.len(),
                            file_path,
                            processing_time
                        );
                        METRICS.lock().record_file_success(records.len() as u64);
                        FileProcessResult {
                            config_index: index,
                            file_path,
                            records,
                            error: None,
                            processing_time_ms: processing_time,
                        }
                    }
                    Err(e) => {
                        let processing_time = start.elapsed().as_millis();
                        error!("Failed to process {}: {}", file_path, e);
                        METRICS.lock().record_file_failure();
                        FileProcessResult {
                            config_index: index,
                            file_path,
                            records: Vec::new(),
                            error: Some(e.to_string()),
                            processing_time_ms: processing_time,
                        }
                    }
                };

                progress_clone.inc(1);
                result
            })
            .collect();

        progress.finish_with_message("All files processed");
        results.sort_by_key(|r| r.config_index);

        let failures = results.iter().filter(|r| r.error.is_some()).count();
        info!(
            "Parallel processing complete: {} files, {} failures",
            total_files, failures
        );
        results
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new()
    }
}
