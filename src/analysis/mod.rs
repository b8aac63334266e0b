mod aggregate;
mod analyzer;
mod batch;
mod box_stats;
mod diversity;
mod file_stats;
mod richness;

pub use aggregate::{
    group_by, sort_by_richness, statistics_by_area, statistics_by_bait, statistics_by_location,
    Aggregation, GroupRecord, GroupRow, GroupedTable, Reduction, Statistic, SummaryDimension,
    SummaryMeasure, AREA_AGGREGATIONS, BAIT_AGGREGATIONS, LOCATION_AGGREGATIONS,
};
pub use analyzer::{CoralReefAnalysis, RichnessAnalysis, SurveyAnalysis};
pub use batch::{collect_reports, coral_reef_records, richness_reports, summarize_sources};
pub use box_stats::{percentile, BoxStats};
pub use diversity::{
    max_n, pielou_evenness, round_to, shannon_index, simpson_index, species_counts,
    species_richness, top_species,
};
pub use file_stats::summarize_file;
pub use richness::{
    coral_reef_bait_summary, species_counts_by_hierarchy, CoralReefDimension, CoralReefMeasure,
    CoralReefRecord, RichnessRecord, RichnessReport, SpeciesCount, CORAL_REEF_BAIT_AGGREGATIONS,
};
