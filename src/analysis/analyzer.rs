use serde::Serialize;

use crate::models::FileSummary;

use super::aggregate::{
    sort_by_richness, statistics_by_area, statistics_by_bait, statistics_by_location, GroupedTable,
};
use super::richness::{coral_reef_bait_summary, CoralReefRecord, RichnessRecord, RichnessReport, SpeciesCount};

/// Per-file table plus the three grouped views of the comprehensive survey.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyAnalysis {
    /// Richest file first
    pub summaries: Vec<FileSummary>,
    pub by_area: GroupedTable,
    pub by_location: GroupedTable,
    pub by_bait: GroupedTable,
}

impl SurveyAnalysis {
    pub fn from_summaries(mut summaries: Vec<FileSummary>) -> Self {
        sort_by_richness(&mut summaries);
        Self {
            by_area: statistics_by_area(&summaries),
            by_location: statistics_by_location(&summaries),
            by_bait: statistics_by_bait(&summaries),
            summaries,
        }
    }

    /// Grouped tables paired with the sheet names used for workbook export.
    pub fn grouped_sheets(&self) -> [(&'static str, &GroupedTable); 3] {
        [
            ("By Area", &self.by_area),
            ("By Location", &self.by_location),
            ("By Bait", &self.by_bait),
        ]
    }
}

/// Richness comparison across a folder of reports.
#[derive(Debug, Clone)]
pub struct RichnessAnalysis {
    /// In discovery order
    pub reports: Vec<RichnessReport>,
}

impl RichnessAnalysis {
    pub fn new(reports: Vec<RichnessReport>) -> Self {
        Self { reports }
    }

    /// One row per file, richest first.
    pub fn comparison(&self) -> Vec<RichnessRecord> {
        let mut records: Vec<RichnessRecord> = self.reports.iter().map(|r| r.record.clone()).collect();
        records.sort_by(|a, b| b.species_richness.cmp(&a.species_richness));
        records
    }

    /// Every file's species list, concatenated in discovery order.
    pub fn detailed(&self) -> Vec<SpeciesCount> {
        self.reports
            .iter()
            .flat_map(|r| r.species.iter().cloned())
            .collect()
    }
}

/// Coral reef richness table and its per-bait summary.
#[derive(Debug, Clone)]
pub struct CoralReefAnalysis {
    /// In file name order
    pub records: Vec<CoralReefRecord>,
    pub by_bait: GroupedTable,
}

impl CoralReefAnalysis {
    pub fn new(records: Vec<CoralReefRecord>) -> Self {
        Self {
            by_bait: coral_reef_bait_summary(&records),
            records,
        }
    }
}
