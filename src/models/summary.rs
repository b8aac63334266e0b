use serde::{Deserialize, Serialize};

use super::report_name::Location;

/// Top-level survey habitat, taken from the source folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AreaType {
    #[serde(rename = "Coral Reef", alias = "coral_reef")]
    CoralReef,
    #[serde(rename = "Nursery", alias = "nursery")]
    Nursery,
}

impl std::fmt::Display for AreaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaType::CoralReef => write!(f, "Coral Reef"),
            AreaType::Nursery => write!(f, "Nursery"),
        }
    }
}

/// Per-video summary of one annotation report.
///
/// Field order is the column order of `comprehensive_analysis_table.csv`.
/// Derived ratios are stored already rounded, so group statistics are
/// computed over the published values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub file_name: String,
    pub area_type: AreaType,
    pub location: Location,
    pub date: String,
    pub bait_type: String,
    /// Number of distinct species labels
    pub species_richness: usize,
    pub total_observations: usize,
    /// Highest count of a single species in a single frame
    pub maxn_overall: usize,
    pub obs_per_species_mean: f64,
    /// Sample standard deviation; `None` for single-species files
    pub obs_per_species_sd: Option<f64>,
    pub shannon_h: f64,
    pub simpson_d: f64,
    pub pielou_j: f64,
    pub unique_frames: usize,
    pub obs_per_frame: f64,
    pub top_3_species: String,
}
