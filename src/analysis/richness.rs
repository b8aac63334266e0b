use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SurveyError;
use crate::models::{
    bait_info, labels, leading_date, Detection, Location, ReportName,
};

use super::aggregate::{group_by, Aggregation, GroupRecord, GroupedTable, Reduction};
use super::diversity::{round_to, species_richness};

/// One row of `species_richness_comparison.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichnessRecord {
    pub file_name: String,
    pub species_richness: usize,
    pub total_observations: usize,
    pub location: Location,
    pub date: Option<String>,
    pub bait_info: Option<String>,
    pub observations_per_species: f64,
}

impl RichnessRecord {
    pub fn from_detections(file_name: &str, detections: &[Detection]) -> Result<Self, SurveyError> {
        if detections.is_empty() {
            return Err(SurveyError::EmptyFile(file_name.to_string()));
        }
        let richness = species_richness(&labels(detections));
        let total = detections.len();

        Ok(Self {
            file_name: file_name.to_string(),
            species_richness: richness,
            total_observations: total,
            location: Location::from_file_name(file_name),
            date: leading_date(file_name),
            bait_info: bait_info(file_name),
            observations_per_species: if richness > 0 {
                round_to(total as f64 / richness as f64, 2)
            } else {
                0.0
            },
        })
    }
}

/// One row of `species_richness_detailed.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesCount {
    pub label_name: String,
    pub label_hierarchy: String,
    pub count: usize,
    pub file_name: String,
}

/// Observations per (label, hierarchy), most observed first.
///
/// Rows without a hierarchy are counted under an empty hierarchy. Unlabelled
/// rows are left out.
pub fn species_counts_by_hierarchy(file_name: &str, detections: &[Detection]) -> Vec<SpeciesCount> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for d in detections.iter().filter(|d| d.has_label()) {
        let hierarchy = d.label_hierarchy.as_deref().unwrap_or_default();
        *counts.entry((d.label_name.as_str(), hierarchy)).or_insert(0) += 1;
    }

    let mut rows: Vec<SpeciesCount> = counts
        .into_iter()
        .map(|((label, hierarchy), count)| SpeciesCount {
            label_name: label.to_string(),
            label_hierarchy: hierarchy.to_string(),
            count,
            file_name: file_name.to_string(),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Richness plus the detailed species list of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct RichnessReport {
    pub record: RichnessRecord,
    pub species: Vec<SpeciesCount>,
}

impl RichnessReport {
    pub fn from_detections(file_name: &str, detections: &[Detection]) -> Result<Self, SurveyError> {
        Ok(Self {
            record: RichnessRecord::from_detections(file_name, detections)?,
            species: species_counts_by_hierarchy(file_name, detections),
        })
    }
}

/// One row of `species_richness_coral_reef.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoralReefRecord {
    pub file_name: String,
    pub date: String,
    pub site: String,
    pub bait: String,
    pub camera: Option<String>,
    pub species_richness: usize,
}

impl CoralReefRecord {
    pub fn from_detections(file_name: &str, detections: &[Detection]) -> Result<Self, SurveyError> {
        if detections.is_empty() {
            return Err(SurveyError::EmptyFile(file_name.to_string()));
        }
        let name = ReportName::parse(file_name);
        Ok(Self {
            file_name: file_name.to_string(),
            date: name.date,
            site: name.site,
            bait: name.bait,
            camera: name.camera,
            species_richness: species_richness(&labels(detections)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoralReefDimension {
    Bait,
    Site,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoralReefMeasure {
    SpeciesRichness,
}

impl GroupRecord for CoralReefRecord {
    type Dimension = CoralReefDimension;
    type Measure = CoralReefMeasure;

    fn dimension_name(dimension: CoralReefDimension) -> &'static str {
        match dimension {
            CoralReefDimension::Bait => "bait",
            CoralReefDimension::Site => "site",
        }
    }

    fn dimension(&self, dimension: CoralReefDimension) -> String {
        match dimension {
            CoralReefDimension::Bait => self.bait.clone(),
            CoralReefDimension::Site => self.site.clone(),
        }
    }

    fn measure(&self, measure: CoralReefMeasure) -> f64 {
        match measure {
            CoralReefMeasure::SpeciesRichness => self.species_richness as f64,
        }
    }
}

/// Columns of `species_richness_coral_reef_by_bait.csv`.
pub const CORAL_REEF_BAIT_AGGREGATIONS: [Aggregation<CoralReefMeasure>; 5] = [
    Aggregation::count("count"),
    Aggregation::new("mean", CoralReefMeasure::SpeciesRichness, Reduction::Mean),
    Aggregation::new("std", CoralReefMeasure::SpeciesRichness, Reduction::Std),
    Aggregation::new("min", CoralReefMeasure::SpeciesRichness, Reduction::Min),
    Aggregation::new("max", CoralReefMeasure::SpeciesRichness, Reduction::Max),
];

/// Species richness per bait, richest bait first.
pub fn coral_reef_bait_summary(records: &[CoralReefRecord]) -> GroupedTable {
    let mut table = group_by(records, &[CoralReefDimension::Bait], &CORAL_REEF_BAIT_AGGREGATIONS);
    table.sort_descending_by("mean");
    table
}
