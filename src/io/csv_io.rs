use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::analysis::GroupedTable;
use crate::error::SurveyError;
use crate::models::Detection;

use super::ensure_parent_dir;

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

fn parse_detections<R: Read>(
    rdr: &mut csv::Reader<R>,
    file_name: &str,
    required: &[&str],
) -> Result<Vec<Detection>, SurveyError> {
    let headers = rdr.headers()?.clone();
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(SurveyError::MissingColumn {
            file: file_name.to_string(),
            column: missing.to_string(),
        });
    }

    let mut detections = Vec::new();
    for result in rdr.deserialize() {
        let row: Detection = result?;
        detections.push(row);
    }
    Ok(detections)
}

/// Read an annotation export, checking that every `required` column is present.
pub fn read_detections(
    path: impl AsRef<Path>,
    required: &[&str],
) -> Result<Vec<Detection>, SurveyError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mut rdr = reader_builder().from_path(path)?;
    parse_detections(&mut rdr, &file_name, required)
}

/// Read an annotation export from CSV bytes.
pub fn read_detections_from_bytes(
    data: &[u8],
    name: &str,
    required: &[&str],
) -> Result<Vec<Detection>, SurveyError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_detections(&mut rdr, name, required)
}

/// Write serializable rows as CSV, header taken from the field names.
pub fn write_records<T: Serialize>(rows: &[T], path: impl AsRef<Path>) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows under an explicit header line, so an empty table still has one.
///
/// `headers` must list the fields of `T` in declaration order.
pub fn write_records_with_headers<T: Serialize>(
    rows: &[T],
    headers: &[&str],
    path: impl AsRef<Path>,
) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a grouped table: key columns, then aggregation columns.
pub fn write_grouped_table(table: &GroupedTable, path: impl AsRef<Path>) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.headers())?;
    for row in &table.rows {
        wtr.write_record(GroupedTable::formatted_row(row))?;
    }
    wtr.flush()?;
    Ok(())
}
