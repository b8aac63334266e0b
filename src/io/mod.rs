mod csv_io;
mod excel_io;
mod json_io;
mod listing;

use std::path::{Path, PathBuf};

use crate::error::SurveyError;
use crate::models::FileSummary;

pub use csv_io::{
    read_detections, read_detections_from_bytes, write_grouped_table, write_records,
    write_records_with_headers,
};
pub use excel_io::write_workbook;
pub use json_io::write_json;
pub use listing::{render_listing, write_listing};

/// Columns of the per-file summary table, in [`FileSummary`] field order.
pub(crate) const SUMMARY_HEADERS: [&str; 16] = [
    "file_name",
    "area_type",
    "location",
    "date",
    "bait_type",
    "species_richness",
    "total_observations",
    "maxn_overall",
    "obs_per_species_mean",
    "obs_per_species_sd",
    "shannon_h",
    "simpson_d",
    "pielou_j",
    "unique_frames",
    "obs_per_frame",
    "top_3_species",
];

/// CSV files directly inside `dir`, sorted by file name.
///
/// The extension match is case-insensitive; subdirectories are skipped.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, SurveyError> {
    if !dir.is_dir() {
        return Err(SurveyError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), SurveyError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write a rendered SVG chart.
pub fn write_svg(svg: &str, path: impl AsRef<Path>) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    std::fs::write(path, svg)?;
    Ok(())
}

/// Trait for writing the per-file summary table.
pub trait SummaryWriter {
    fn write(&self, summaries: &[FileSummary], path: &Path) -> Result<(), SurveyError>;
}

/// CSV table writer.
pub struct CsvFormat;

impl SummaryWriter for CsvFormat {
    fn write(&self, summaries: &[FileSummary], path: &Path) -> Result<(), SurveyError> {
        write_records_with_headers(summaries, &SUMMARY_HEADERS, path)
    }
}

/// JSON array writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl SummaryWriter for JsonFormat {
    fn write(&self, summaries: &[FileSummary], path: &Path) -> Result<(), SurveyError> {
        write_json(summaries, path, self.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize_file;
    use crate::models::{AreaType, Detection};

    fn sample_summaries() -> Vec<FileSummary> {
        let rows = vec![
            Detection::new("Chromis viridis", "1"),
            Detection::new("Chromis viridis", "1"),
            Detection::new("Scarus sp.", "1"),
        ];
        vec![summarize_file("25102024-utumbi-c1-squid-ganz.csv", AreaType::CoralReef, &rows).unwrap()]
    }

    #[test]
    fn test_discover_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.csv", "a.csv", "b.csv", "readme.md"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_csv_files(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SurveyError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_csv_trait_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let writer: &dyn SummaryWriter = &CsvFormat;
        writer.write(&sample_summaries(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("25102024-utumbi-c1-squid-ganz.csv"));
    }

    #[test]
    fn test_csv_trait_writes_header_for_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        CsvFormat.write(&[], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert_eq!(text.trim_end(), SUMMARY_HEADERS.join(","));
    }

    #[test]
    fn test_summary_headers_match_serialized_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_records(&sample_summaries(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next().unwrap(), SUMMARY_HEADERS.join(","));
    }

    #[test]
    fn test_json_trait_writes_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let writer: &dyn SummaryWriter = &JsonFormat { pretty: true };
        writer.write(&sample_summaries(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["bait_type"], "squid");
    }

    #[test]
    fn test_write_svg_creates_figures_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures").join("chart.svg");
        write_svg("<svg/>", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_json_format_default() {
        let fmt = JsonFormat::default();
        assert!(!fmt.pretty);
    }
}
