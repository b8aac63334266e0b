use std::collections::HashSet;

use statrs::statistics::Statistics;

use crate::error::SurveyError;
use crate::models::{labels, AreaType, Detection, FileSummary, SurveyName};

use super::diversity::{
    max_n, pielou_evenness, round_to, shannon_index, simpson_index, species_counts, top_species,
};

/// Summarise one annotation report.
///
/// Returns [`SurveyError::EmptyFile`] when the report has no rows; callers
/// treat that as "skip this file", not as a failed run.
pub fn summarize_file(
    file_name: &str,
    area_type: AreaType,
    detections: &[Detection],
) -> Result<FileSummary, SurveyError> {
    if detections.is_empty() {
        return Err(SurveyError::EmptyFile(file_name.to_string()));
    }

    let labels = labels(detections);
    let counts = species_counts(&labels);
    let richness = counts.len();
    let total = detections.len();

    let per_species: Vec<f64> = counts.values().map(|&c| c as f64).collect();
    let obs_mean = if per_species.is_empty() {
        0.0
    } else {
        per_species.iter().mean()
    };
    let obs_sd = if per_species.len() > 1 {
        Some(round_to(per_species.iter().std_dev(), 2))
    } else {
        None
    };

    let unique_frames = detections
        .iter()
        .filter_map(|d| d.frame.as_deref())
        .collect::<HashSet<_>>()
        .len();
    let obs_per_frame = if unique_frames > 0 {
        round_to(total as f64 / unique_frames as f64, 2)
    } else {
        0.0
    };

    let name = SurveyName::parse(file_name);

    Ok(FileSummary {
        file_name: file_name.to_string(),
        area_type,
        location: name.location,
        date: name.date,
        bait_type: name.bait,
        species_richness: richness,
        total_observations: total,
        maxn_overall: max_n(detections),
        obs_per_species_mean: round_to(obs_mean, 2),
        obs_per_species_sd: obs_sd,
        shannon_h: round_to(shannon_index(&labels), 3),
        simpson_d: round_to(simpson_index(&labels), 3),
        pielou_j: round_to(pielou_evenness(&labels), 3),
        unique_frames,
        obs_per_frame,
        top_3_species: top_species(&counts, 3).join(", "),
    })
}
