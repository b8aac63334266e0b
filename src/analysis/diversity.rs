use std::collections::{BTreeMap, HashMap};

use crate::models::Detection;

/// Observations per species label, keyed in label order.
pub fn species_counts<'a>(labels: &[&'a str]) -> BTreeMap<&'a str, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(*label).or_insert(0) += 1;
    }
    counts
}

/// Number of distinct species labels.
pub fn species_richness(labels: &[&str]) -> usize {
    species_counts(labels).len()
}

fn proportions(labels: &[&str]) -> Vec<f64> {
    let total = labels.len() as f64;
    species_counts(labels)
        .values()
        .map(|&count| count as f64 / total)
        .collect()
}

/// Shannon diversity index H' = -Σ p·ln(p).
///
/// Zero for an empty sample and for a single-species sample.
///
/// # Examples
///
/// ```
/// use reef_survey_analyzer::analysis::shannon_index;
///
/// let h = shannon_index(&["A", "B"]);
/// assert!((h - 2f64.ln()).abs() < 1e-12);
/// assert_eq!(shannon_index(&["A", "A"]), 0.0);
/// ```
pub fn shannon_index(labels: &[&str]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    proportions(labels)
        .into_iter()
        .fold(0.0, |acc, p| acc + p * (1.0 / p).ln())
}

/// Simpson diversity index D = 1 - Σ p².
pub fn simpson_index(labels: &[&str]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    1.0 - proportions(labels).into_iter().map(|p| p * p).sum::<f64>()
}

/// Pielou's evenness J = H' / ln(S).
///
/// Defined as 0 when fewer than two species are present, where ln(S) is 0.
pub fn pielou_evenness(labels: &[&str]) -> f64 {
    let richness = species_richness(labels);
    if richness <= 1 {
        return 0.0;
    }
    // float error can push a perfectly even sample just past 1
    (shannon_index(labels) / (richness as f64).ln()).clamp(0.0, 1.0)
}

/// Highest number of individuals of one species annotated in one frame.
///
/// Rows without a frame identifier or without a label are not counted.
/// Returns 0 when no such row remains.
pub fn max_n(detections: &[Detection]) -> usize {
    let mut per_frame: HashMap<(&str, &str), usize> = HashMap::new();
    for d in detections.iter().filter(|d| d.has_label()) {
        if let Some(frame) = d.frame.as_deref() {
            *per_frame.entry((d.label_name.as_str(), frame)).or_insert(0) += 1;
        }
    }
    per_frame.into_values().max().unwrap_or(0)
}

/// The `n` most frequent labels; ties go to the alphabetically first label.
pub fn top_species<'a>(counts: &BTreeMap<&'a str, usize>, n: usize) -> Vec<&'a str> {
    let mut ranked: Vec<(&'a str, usize)> = counts.iter().map(|(l, c)| (*l, *c)).collect();
    // stable: BTreeMap order breaks ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(label, _)| label).collect()
}

/// Round to `decimals` places, halves to the even neighbour.
///
/// Scales, rounds and scales back, so `1.125` at two places gives `1.12`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
