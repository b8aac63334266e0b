use std::path::Path;

use crate::error::SurveyError;

use super::{discover_csv_files, ensure_parent_dir};

/// Markdown listing of report files, one section per folder.
pub fn render_listing(sections: &[(String, Vec<String>)]) -> String {
    let mut lines = vec!["# Annotation reports (sorted)".to_string(), String::new()];
    for (folder, files) in sections {
        lines.push(format!("## {folder}"));
        lines.push(String::new());
        lines.extend(files.iter().map(|f| format!("- {f}")));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// List the CSV files of each folder under `base_dir` and write the listing to `output`.
///
/// Returns the number of files listed.
pub fn write_listing(
    base_dir: &Path,
    folders: &[String],
    output: &Path,
) -> Result<usize, SurveyError> {
    let mut sections = Vec::with_capacity(folders.len());
    let mut total = 0;
    for folder in folders {
        let files: Vec<String> = discover_csv_files(&base_dir.join(folder))?
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        total += files.len();
        sections.push((folder.clone(), files));
    }

    ensure_parent_dir(output)?;
    std::fs::write(output, render_listing(&sections))?;
    Ok(total)
}
