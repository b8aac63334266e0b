use std::path::{Path, PathBuf};

use crate::error::SurveyError;
use crate::io::{discover_csv_files, read_detections};
use crate::models::{AreaType, FileSummary, FRAMES, LABEL_NAME};
use crate::report::ReportSink;

use super::file_stats::summarize_file;
use super::richness::{CoralReefRecord, RichnessReport};

/// Apply `analyse` to every CSV file in `dir`, keeping the successes.
///
/// A missing `dir` is fatal. A failure on one file is reported to `sink`
/// under that file's name and the batch moves on.
pub fn collect_reports<T, S, F>(dir: &Path, sink: &mut S, mut analyse: F) -> Result<Vec<T>, SurveyError>
where
    S: ReportSink,
    F: FnMut(&Path, &str) -> Result<T, SurveyError>,
{
    let files = discover_csv_files(dir)?;
    sink.info(format!("{} CSV files found in {}", files.len(), dir.display()));

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        sink.file_started(&file_name);
        match analyse(&path, &file_name) {
            Ok(result) => results.push(result),
            Err(e) => sink.file_skipped(&file_name, e.to_string()),
        }
    }
    Ok(results)
}

/// Summarise every report of every source directory, in source order.
///
/// All directories are checked before any file is read.
pub fn summarize_sources<S: ReportSink>(
    sources: &[(PathBuf, AreaType)],
    sink: &mut S,
) -> Result<Vec<FileSummary>, SurveyError> {
    if let Some((missing, _)) = sources.iter().find(|(dir, _)| !dir.is_dir()) {
        return Err(SurveyError::DirectoryNotFound(missing.clone()));
    }

    let mut summaries = Vec::new();
    for (dir, area) in sources {
        sink.info(format!("Analysing {area} reports"));
        summaries.extend(collect_reports(dir, sink, |path, name| {
            let detections = read_detections(path, &[LABEL_NAME, FRAMES])?;
            summarize_file(name, *area, &detections)
        })?);
    }
    Ok(summaries)
}

/// Richness and species lists for every report in `dir`.
pub fn richness_reports<S: ReportSink>(dir: &Path, sink: &mut S) -> Result<Vec<RichnessReport>, SurveyError> {
    collect_reports(dir, sink, |path, name| {
        let detections = read_detections(path, &[LABEL_NAME])?;
        RichnessReport::from_detections(name, &detections)
    })
}

/// Coral reef richness records for every report in `dir`.
pub fn coral_reef_records<S: ReportSink>(dir: &Path, sink: &mut S) -> Result<Vec<CoralReefRecord>, SurveyError> {
    collect_reports(dir, sink, |path, name| {
        let detections = read_detections(path, &[LABEL_NAME])?;
        CoralReefRecord::from_detections(name, &detections)
    })
}
