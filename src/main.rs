use chrono::{DateTime, Utc};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use lnm_pipeline::config::{self, PipelineConfig};
use lnm_pipeline::errors::PipelineError;
use lnm_pipeline::pipeline;

#[derive(Parser, Debug)]
#[command(name = "lnm_pipeline")]
#[command(about = "Normalize and classify chart changes from Local Notice to Mariners listings", long_about = None)]
struct Args {
    /// Path to the JSON pipeline configuration
    #[arg(long, env = "LNM_CONFIG")]
    config: Option<String>,

    /// Directory scanned for listing files (overrides the config)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Output path for the full report
    #[arg(long)]
    output_all: Option<PathBuf>,

    /// Output path for the chart-check shortlist
    #[arg(long)]
    output_best: Option<PathBuf>,

    /// Fixed reference time (RFC 3339) for the future-year guard;
    /// defaults to now
    #[arg(long)]
    reference_time: Option<DateTime<Utc>>,
}

fn build_config(args: Args) -> Result<PipelineConfig, PipelineError> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => PipelineConfig::default(),
    };
    if args.input_dir.is_some() {
        config.input_dir = args.input_dir;
        // An explicit directory replaces any configured file list.
        config.inputs.clear();
    }
    if let Some(path) = args.output_all {
        config.output_all = path;
    }
    if let Some(path) = args.output_best {
        config.output_best = path;
    }
    if args.reference_time.is_some() {
        config.reference_time = args.reference_time;
    }
    Ok(config)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    info!("--- LNM pipeline starting ---");
    let result = build_config(args).and_then(|config| pipeline::run(&config));

    match result {
        Ok(()) => info!("--- LNM pipeline finished ---"),
        Err(e) => {
            error!("Pipeline failed: {}", e);
            process::exit(1);
        }
    }
}
