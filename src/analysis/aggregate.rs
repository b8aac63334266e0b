use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::models::FileSummary;

use super::diversity::round_to;

/// Reduction applied to the values of one measure within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    /// Sample standard deviation (n - 1)
    Std,
    Min,
    Max,
}

impl Reduction {
    /// Reduce a group's values. `None` where the statistic is undefined.
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Reduction::Sum => Some(values.iter().sum()),
            Reduction::Mean => Some(values.iter().mean()),
            Reduction::Std => (values.len() > 1).then(|| values.iter().std_dev()),
            Reduction::Min => values.iter().copied().reduce(f64::min),
            Reduction::Max => values.iter().copied().reduce(f64::max),
        }
    }
}

/// What an output column holds: the group size, or a reduced measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic<M> {
    Count,
    Reduce(M, Reduction),
}

/// One output column of a grouped table, named where it is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation<M> {
    pub name: &'static str,
    pub statistic: Statistic<M>,
}

impl<M> Aggregation<M> {
    pub const fn count(name: &'static str) -> Self {
        Self {
            name,
            statistic: Statistic::Count,
        }
    }

    pub const fn new(name: &'static str, measure: M, reduction: Reduction) -> Self {
        Self {
            name,
            statistic: Statistic::Reduce(measure, reduction),
        }
    }
}

/// A row type that can be grouped by categorical dimensions and reduced over numeric measures.
pub trait GroupRecord {
    type Dimension: Copy;
    type Measure: Copy;

    /// Column header for a dimension.
    fn dimension_name(dimension: Self::Dimension) -> &'static str;

    fn dimension(&self, dimension: Self::Dimension) -> String;

    fn measure(&self, measure: Self::Measure) -> f64;
}

/// One group of a [`GroupedTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub keys: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Result of a group-by: key columns followed by one column per aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedTable {
    pub key_columns: Vec<String>,
    pub value_columns: Vec<String>,
    pub rows: Vec<GroupRow>,
}

impl GroupedTable {
    /// Key headers followed by value headers.
    pub fn headers(&self) -> Vec<String> {
        self.key_columns
            .iter()
            .chain(self.value_columns.iter())
            .cloned()
            .collect()
    }

    /// Position of a value column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.value_columns.iter().position(|c| c == name)
    }

    /// Value of `column` in the row whose keys equal `keys`.
    pub fn value(&self, keys: &[&str], column: &str) -> Option<f64> {
        let idx = self.column(column)?;
        self.rows
            .iter()
            .find(|r| r.keys.iter().map(String::as_str).eq(keys.iter().copied()))
            .and_then(|r| r.values[idx])
    }

    /// Round every value to `decimals` places.
    pub fn rounded(mut self, decimals: i32) -> Self {
        for row in &mut self.rows {
            for value in row.values.iter_mut().flatten() {
                *value = round_to(*value, decimals);
            }
        }
        self
    }

    /// Stable sort by a value column, largest first, undefined values last.
    pub fn sort_descending_by(&mut self, column: &str) {
        if let Some(idx) = self.column(column) {
            self.rows
                .sort_by(|a, b| descending_nulls_last(a.values[idx], b.values[idx]));
        }
    }

    /// Row cells as text; undefined values are empty.
    pub fn formatted_row(row: &GroupRow) -> Vec<String> {
        row.keys
            .iter()
            .cloned()
            .chain(row.values.iter().map(|v| v.map(|x| x.to_string()).unwrap_or_default()))
            .collect()
    }
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Group `records` by `dimensions` (groups in ascending key order) and apply `aggregations`.
pub fn group_by<R: GroupRecord>(
    records: &[R],
    dimensions: &[R::Dimension],
    aggregations: &[Aggregation<R::Measure>],
) -> GroupedTable {
    let mut groups: BTreeMap<Vec<String>, Vec<&R>> = BTreeMap::new();
    for record in records {
        let keys = dimensions.iter().map(|d| record.dimension(*d)).collect();
        groups.entry(keys).or_default().push(record);
    }

    let rows = groups
        .into_iter()
        .map(|(keys, members)| {
            let values = aggregations
                .iter()
                .map(|agg| match agg.statistic {
                    Statistic::Count => Some(members.len() as f64),
                    Statistic::Reduce(measure, reduction) => {
                        let values: Vec<f64> = members.iter().map(|r| r.measure(measure)).collect();
                        reduction.apply(&values)
                    }
                })
                .collect();
            GroupRow { keys, values }
        })
        .collect();

    GroupedTable {
        key_columns: dimensions
            .iter()
            .map(|d| R::dimension_name(*d).to_string())
            .collect(),
        value_columns: aggregations.iter().map(|a| a.name.to_string()).collect(),
        rows,
    }
}

/// Categorical columns of a [`FileSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryDimension {
    AreaType,
    Location,
    BaitType,
}

/// Numeric columns of a [`FileSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMeasure {
    SpeciesRichness,
    MaxN,
    TotalObservations,
    Shannon,
    Pielou,
}

impl GroupRecord for FileSummary {
    type Dimension = SummaryDimension;
    type Measure = SummaryMeasure;

    fn dimension_name(dimension: SummaryDimension) -> &'static str {
        match dimension {
            SummaryDimension::AreaType => "area_type",
            SummaryDimension::Location => "location",
            SummaryDimension::BaitType => "bait_type",
        }
    }

    fn dimension(&self, dimension: SummaryDimension) -> String {
        match dimension {
            SummaryDimension::AreaType => self.area_type.to_string(),
            SummaryDimension::Location => self.location.to_string(),
            SummaryDimension::BaitType => self.bait_type.clone(),
        }
    }

    fn measure(&self, measure: SummaryMeasure) -> f64 {
        match measure {
            SummaryMeasure::SpeciesRichness => self.species_richness as f64,
            SummaryMeasure::MaxN => self.maxn_overall as f64,
            SummaryMeasure::TotalObservations => self.total_observations as f64,
            SummaryMeasure::Shannon => self.shannon_h,
            SummaryMeasure::Pielou => self.pielou_j,
        }
    }
}

use Reduction::{Max, Mean, Min, Std, Sum};
use SummaryMeasure::{MaxN, Pielou, Shannon, SpeciesRichness, TotalObservations};

/// Columns of `statistics_by_area.csv`.
pub const AREA_AGGREGATIONS: [Aggregation<SummaryMeasure>; 10] = [
    Aggregation::count("file_count"),
    Aggregation::new("richness_mean", SpeciesRichness, Mean),
    Aggregation::new("richness_sd", SpeciesRichness, Std),
    Aggregation::new("richness_min", SpeciesRichness, Min),
    Aggregation::new("richness_max", SpeciesRichness, Max),
    Aggregation::new("maxn_mean", MaxN, Mean),
    Aggregation::new("maxn_sd", MaxN, Std),
    Aggregation::new("observations_total", TotalObservations, Sum),
    Aggregation::new("shannon_mean", Shannon, Mean),
    Aggregation::new("evenness_mean", Pielou, Mean),
];

/// Columns of `statistics_by_location.csv`.
pub const LOCATION_AGGREGATIONS: [Aggregation<SummaryMeasure>; 6] = [
    Aggregation::count("file_count"),
    Aggregation::new("richness_mean", SpeciesRichness, Mean),
    Aggregation::new("richness_sd", SpeciesRichness, Std),
    Aggregation::new("maxn_mean", MaxN, Mean),
    Aggregation::new("observations_total", TotalObservations, Sum),
    Aggregation::new("shannon_mean", Shannon, Mean),
];

/// Columns of `statistics_by_bait.csv`.
pub const BAIT_AGGREGATIONS: [Aggregation<SummaryMeasure>; 6] = [
    Aggregation::count("video_count"),
    Aggregation::new("richness_mean", SpeciesRichness, Mean),
    Aggregation::new("richness_sd", SpeciesRichness, Std),
    Aggregation::new("maxn_mean", MaxN, Mean),
    Aggregation::new("obs_mean", TotalObservations, Mean),
    Aggregation::new("shannon_mean", Shannon, Mean),
];

/// Summary statistics per area type.
pub fn statistics_by_area(summaries: &[FileSummary]) -> GroupedTable {
    group_by(summaries, &[SummaryDimension::AreaType], &AREA_AGGREGATIONS).rounded(2)
}

/// Summary statistics per (location, area type).
pub fn statistics_by_location(summaries: &[FileSummary]) -> GroupedTable {
    group_by(
        summaries,
        &[SummaryDimension::Location, SummaryDimension::AreaType],
        &LOCATION_AGGREGATIONS,
    )
    .rounded(2)
}

/// Summary statistics per bait type, richest bait first.
pub fn statistics_by_bait(summaries: &[FileSummary]) -> GroupedTable {
    let mut table =
        group_by(summaries, &[SummaryDimension::BaitType], &BAIT_AGGREGATIONS).rounded(2);
    table.sort_descending_by("richness_mean");
    table
}

/// Order summaries by species richness, richest first, keeping discovery order for ties.
pub fn sort_by_richness(summaries: &mut [FileSummary]) {
    summaries.sort_by(|a, b| b.species_richness.cmp(&a.species_richness));
}
