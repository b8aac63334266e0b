use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while analysing annotation reports.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Chart error: {0}")]
    ChartError(String),
}

impl From<rust_xlsxwriter::XlsxError> for SurveyError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SurveyError::Excel(e.to_string())
    }
}
