use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::models::AreaType;

/// A folder of annotation exports and the habitat it was filmed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub folder: String,
    pub area: AreaType,
}

/// SVG chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    /// Seed for the point jitter, so charts are reproducible
    pub jitter_seed: u64,
    /// Bar colour per site
    pub site_colors: BTreeMap<String, String>,
    /// Bar colour for sites without an entry in `site_colors`
    pub default_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let site_colors = [("milimani", "#4daf4a"), ("utumbi", "#984ea3")]
            .into_iter()
            .map(|(site, color)| (site.to_string(), color.to_string()))
            .collect();
        Self {
            width: 900,
            height: 500,
            jitter_seed: 42,
            site_colors,
            default_color: "#a6cee3".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn color_for(&self, site: &str) -> &str {
        self.site_colors
            .get(site)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

/// Folder layout and output settings, all relative to a base directory.
///
/// Every field has a default, so a config file only lists what differs.
///
/// ```toml
/// output_dir = "out"
///
/// [[sources]]
/// folder = "Annotation_reports_coral_reef"
/// area = "Coral Reef"
///
/// [charts]
/// jitter_seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Folders combined by the comprehensive analysis, in report order
    pub sources: Vec<SourceConfig>,
    /// Folder for the richness comparison
    pub richness_dir: PathBuf,
    /// Folder for the coral reef richness tables and charts
    pub coral_reef_dir: PathBuf,
    pub output_dir: PathBuf,
    pub listing_path: PathBuf,
    pub charts: ChartConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceConfig {
                    folder: "Annotation_reports_coral_reef".to_string(),
                    area: AreaType::CoralReef,
                },
                SourceConfig {
                    folder: "Annotation_reports_Nursery".to_string(),
                    area: AreaType::Nursery,
                },
            ],
            richness_dir: PathBuf::from("Annotation_reports"),
            coral_reef_dir: PathBuf::from("Annotation_reports_coral_reef"),
            output_dir: PathBuf::from("results"),
            listing_path: PathBuf::from("data/annotation_reports_sorted.md"),
            charts: ChartConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SurveyError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Source folders resolved against `base_dir`.
    pub fn source_dirs(&self, base_dir: &Path) -> Vec<(PathBuf, AreaType)> {
        self.sources
            .iter()
            .map(|s| (base_dir.join(&s.folder), s.area))
            .collect()
    }

    pub fn source_folders(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.folder.clone()).collect()
    }
}
