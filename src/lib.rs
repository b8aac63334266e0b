pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod visualization;

pub use analysis::{CoralReefAnalysis, RichnessAnalysis, SurveyAnalysis};
pub use config::AnalyzerConfig;
pub use error::SurveyError;
pub use io::{CsvFormat, JsonFormat, SummaryWriter};
pub use models::{AreaType, Detection, FileSummary, Location, ReportName, SurveyName};
pub use report::{CollectingSink, ReportSink, TracingSink};
