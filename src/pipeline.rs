//! End-to-end assembly: raw parsed rows become classified, resolved,
//! neighbor-annotated records sorted on the effective-week axis.

use crate::classifier;
use crate::config::{FileConfig, PipelineConfig};
use crate::data_models::ChangeRecord;
use crate::errors::PipelineError;
use crate::export;
use crate::geo::{self, LocatedPoint, METERS_PER_NAUTICAL_MILE};
use crate::metrics::METRICS;
use crate::parallel::ParallelProcessor;
use crate::resolver;
use crate::time_operation;
use crate::validation;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::Path;
use walkdir::WalkDir;

/// Fills the derived fields of freshly parsed records in a single pass
/// and assigns sequential ids. Records are immutable afterwards.
///
/// The reference time drives only the future-year guard; resolution and
/// classification are otherwise pure per-record functions.
pub fn decorate_records(
    raw: Vec<ChangeRecord>,
    reference: DateTime<Utc>,
) -> Vec<ChangeRecord> {
    raw.into_iter()
        .enumerate()
        .map(|(id, mut record)| {
            record.id = id;
            record.effective = resolver::resolve_effective(&record.published, reference);
            record.is_note = classifier::is_note(&record.item);
            record.is_add = classifier::is_add(&record.action);
            record.is_delete = classifier::is_delete(&record.action);
            record.use_flag = classifier::is_conspicuous(
                record.effective.as_deref(),
                record.is_add,
                record.is_delete,
                &record.item,
                &record.label,
            );

            METRICS.lock().record_resolution(record.effective.is_some());

            if let Err(message) = validation::validate_record(&record) {
                warn!(
                    "Record {} ({} '{}'): {}",
                    record.id, record.chart, record.item, message
                );
            }

            record
        })
        .collect()
}

fn located_points<'a, I>(records: I) -> Vec<LocatedPoint>
where
    I: Iterator<Item = &'a ChangeRecord>,
{
    records
        .filter_map(|r| match (r.lat, r.lng) {
            (Some(lat), Some(lng)) => Some(LocatedPoint { id: r.id, lat, lng }),
            _ => None,
        })
        .collect()
}

/// Annotates each located record with its nearest neighbor, once over all
/// located records and once within the conspicuous subset.
pub fn annotate_neighbors(records: &mut [ChangeRecord]) {
    let all_points = located_points(records.iter());
    let all_neighbors = geo::nearest_neighbors(&all_points);
    apply_neighbors(records, &all_points, &all_neighbors, false);

    let use_points = located_points(records.iter().filter(|r| r.use_flag));
    let use_neighbors = geo::nearest_neighbors(&use_points);
    apply_neighbors(records, &use_points, &use_neighbors, true);
}

fn apply_neighbors(
    records: &mut [ChangeRecord],
    points: &[LocatedPoint],
    neighbors: &[Option<crate::data_models::NeighborInfo>],
    use_subset: bool,
) {
    for (point, neighbor) in points.iter().zip(neighbors) {
        // Ids are the records' positions at decoration time; neighbor
        // annotation happens before sorting, so indexing by id is valid.
        let record = &mut records[point.id];
        debug_assert_eq!(record.id, point.id);
        if use_subset {
            record.use_neighbor = *neighbor;
        } else {
            record.all_neighbor = *neighbor;
        }
    }
}

/// Sorts records by effective week, unresolved records first, then
/// ascending. The identifier's fixed "20YYwWW" shape makes lexicographic
/// order chronological. The sort is stable, so records within one week
/// keep input order.
pub fn sort_by_effective(records: &mut [ChangeRecord]) {
    records.sort_by(|a, b| a.effective.cmp(&b.effective));
}

/// The chart-check shortlist: conspicuous records spaced more than
/// `min_spacing_m` from their nearest conspicuous neighbor. A lone
/// conspicuous record has nothing to be confused with and passes.
pub fn shortlist(records: &[ChangeRecord], min_spacing_m: f64) -> Vec<&ChangeRecord> {
    let threshold_nmi = min_spacing_m / METERS_PER_NAUTICAL_MILE;
    records
        .iter()
        .filter(|r| {
            r.use_flag && r.use_neighbor.map_or(true, |n| n.dist_nmi > threshold_nmi)
        })
        .collect()
}

/// Discovers listing files under a directory when no explicit inputs are
/// configured. Paths are sorted for a deterministic record order.
pub fn discover_inputs(dir: &Path) -> Result<Vec<FileConfig>, PipelineError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| PipelineError::InputDiscovery {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if matches!(ext.to_lowercase().as_str(), "txt" | "tsv" | "csv") => {
                paths.push(path);
            }
            _ => {}
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| FileConfig {
            path,
            chart: None,
            format_type: "NoaaListing".to_string(),
            delimiter: None,
            preamble_rows: 1,
        })
        .collect())
}

/// Runs the whole pipeline: parse configured listings in parallel,
/// decorate, annotate neighbors, sort, and export the two CSV reports.
pub fn run(config: &PipelineConfig) -> Result<(), PipelineError> {
    let reference = config.reference_time.unwrap_or_else(Utc::now);
    info!(
        "Reference time for future-year guard: {}",
        reference.to_rfc3339()
    );

    let inputs = if !config.inputs.is_empty() {
        config.inputs.clone()
    } else if let Some(dir) = &config.input_dir {
        let discovered = discover_inputs(dir)?;
        info!(
            "Discovered {} listing files under {}",
            discovered.len(),
            dir.display()
        );
        discovered
    } else {
        return Err(PipelineError::Config(
            "No inputs configured: set 'inputs' or 'input_dir'".to_string(),
        ));
    };

    let processor = ParallelProcessor::new();
    let results = time_operation!("parse", processor.process_files(inputs));

    let raw: Vec<ChangeRecord> = results.into_iter().flat_map(|r| r.records).collect();
    info!("Parsed {} raw records", raw.len());

    let mut records = time_operation!("decorate", decorate_records(raw, reference));
    time_operation!("neighbors", annotate_neighbors(&mut records));
    sort_by_effective(&mut records);

    let best = shortlist(&records, config.min_spacing_m);
    METRICS.lock().record_shortlisted(best.len() as u64);
    info!(
        "{} records total, {} on the chart-check shortlist",
        records.len(),
        best.len()
    );

    export::write_records(&config.output_all, records.iter())?;
    export::write_records(&config.output_best, best.iter().copied())?;

    METRICS.lock().print_summary();
    Ok(())
}
