use crate::data_models::ChangeRecord;
use crate::errors::PipelineError;
use crate::models::OutputRow;
use csv::WriterBuilder;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes records to a CSV report at `path`. Absent optional values
/// serialize as empty fields.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<(), PipelineError>
where
    I: Iterator<Item = &'a ChangeRecord>,
{
    let file = File::create(path).map_err(|e| PipelineError::ExportIoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let count = write_records_to(file, records).map_err(|e| PipelineError::ExportError {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Wrote {} records to {}", count, path.display());
    Ok(())
}

/// Writer-based variant so tests can export to memory. Returns the number
/// of records written.
pub fn write_records_to<'a, W, I>(writer: W, records: I) -> Result<usize, csv::Error>
where
    W: Write,
    I: Iterator<Item = &'a ChangeRecord>,
{
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    let mut count = 0;
    for record in records {
        writer.serialize(OutputRow::from(record))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
