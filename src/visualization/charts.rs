use std::collections::{BTreeMap, BTreeSet};

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::analysis::{
    coral_reef_bait_summary, group_by, Aggregation, BoxStats, CoralReefDimension,
    CoralReefMeasure, CoralReefRecord, Reduction,
};
use crate::config::ChartConfig;
use crate::error::SurveyError;

use super::svg::{Anchor, Margins, PlotFrame, Style, SvgDocument, INK};

const BOX_FILL: &str = "#b3cde3";
const POINT_FILL: &str = "#1f78b4";
const BAR_OPACITY: f64 = 0.85;

const BAR_AGGREGATIONS: [Aggregation<CoralReefMeasure>; 2] = [
    Aggregation::new("mean", CoralReefMeasure::SpeciesRichness, Reduction::Mean),
    Aggregation::new("std", CoralReefMeasure::SpeciesRichness, Reduction::Std),
];

/// Richness values per bait, baits ordered by mean richness (highest first).
fn richness_by_bait(records: &[CoralReefRecord]) -> Vec<(String, Vec<f64>)> {
    let mut values: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in records {
        values
            .entry(r.bait.as_str())
            .or_default()
            .push(r.species_richness as f64);
    }

    coral_reef_bait_summary(records)
        .rows
        .into_iter()
        .filter_map(|row| {
            let bait = row.keys.into_iter().next()?;
            let v = values.remove(bait.as_str())?;
            Some((bait, v))
        })
        .collect()
}

/// Box plot of species richness per bait, with every report drawn as a jittered point.
pub fn render_richness_box_plot(
    records: &[CoralReefRecord],
    config: &ChartConfig,
) -> Result<String, SurveyError> {
    if records.is_empty() {
        return Err(SurveyError::InsufficientData(
            "no coral reef reports to plot".to_string(),
        ));
    }

    let groups = richness_by_bait(records);
    let all = records.iter().map(|r| r.species_richness as f64);
    let lo = all.clone().fold(f64::INFINITY, f64::min);
    let hi = all.fold(f64::NEG_INFINITY, f64::max);

    let mut doc = SvgDocument::new(config.width, config.height);
    let frame = PlotFrame::new(
        doc.width(),
        doc.height(),
        Margins::default(),
        (lo - 1.0).max(0.0),
        hi + 1.0,
    );
    frame.draw_titles(
        &mut doc,
        "Species richness per bait (coral reef reports)",
        "Bait",
        "Species richness",
    );
    frame.draw_axes(&mut doc, 5);

    let slot = frame.width() / groups.len() as f64;
    let box_width = slot * 0.45;
    let jitter = Normal::new(0.0, box_width * 0.15)
        .map_err(|e| SurveyError::ChartError(format!("jitter distribution: {e}")))?;
    let mut rng = StdRng::seed_from_u64(config.jitter_seed);

    let box_style = Style::fill(BOX_FILL).stroke(INK);
    let point_style = Style::fill(POINT_FILL).opacity(0.8);

    for (i, (bait, values)) in groups.iter().enumerate() {
        let cx = frame.left + (i as f64 + 0.5) * slot;
        let Some(stats) = BoxStats::from_values(values) else {
            continue;
        };
        let half = box_width / 2.0;
        let cap = box_width / 4.0;

        let (y_q1, y_q3) = (frame.y(stats.q1), frame.y(stats.q3));
        doc.rect(cx - half, y_q3, box_width, y_q1 - y_q3, &box_style);
        let y_median = frame.y(stats.median);
        doc.line(cx - half, y_median, cx + half, y_median);

        let (y_low, y_high) = (frame.y(stats.lower), frame.y(stats.upper));
        doc.line(cx, y_q3, cx, y_high)
            .line(cx, y_q1, cx, y_low)
            .line(cx - cap, y_high, cx + cap, y_high)
            .line(cx - cap, y_low, cx + cap, y_low);

        for value in values {
            let x = cx + jitter.sample(&mut rng);
            doc.circle(x, frame.y(*value), 3.0, &point_style);
        }

        frame.category_label(&mut doc, cx, bait);
    }

    Ok(doc.finish())
}

/// Mean species richness per bait and site as grouped bars with ±1 sd error bars.
pub fn render_bait_site_bar_chart(
    records: &[CoralReefRecord],
    config: &ChartConfig,
) -> Result<String, SurveyError> {
    if records.is_empty() {
        return Err(SurveyError::InsufficientData(
            "no coral reef reports to plot".to_string(),
        ));
    }

    let table = group_by(
        records,
        &[CoralReefDimension::Bait, CoralReefDimension::Site],
        &BAR_AGGREGATIONS,
    );

    // (bait, site) -> (mean, std)
    let mut cells: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
    for row in &table.rows {
        let [bait, site] = row.keys.as_slice() else {
            continue;
        };
        let mean = row.values[0].unwrap_or_default();
        let std = row.values[1].unwrap_or_default();
        cells.insert((bait.clone(), site.clone()), (mean, std));
    }

    let sites: Vec<String> = cells
        .keys()
        .map(|(_, site)| site.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut site_means: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for ((bait, _), (mean, _)) in &cells {
        site_means.entry(bait.as_str()).or_default().push(*mean);
    }
    let mut baits: Vec<(&str, f64)> = site_means
        .into_iter()
        .map(|(bait, means)| (bait, means.iter().sum::<f64>() / means.len() as f64))
        .collect();
    baits.sort_by(|a, b| b.1.total_cmp(&a.1));

    let max_mean = cells.values().map(|c| c.0).fold(0.0, f64::max);
    let max_std = cells.values().map(|c| c.1).fold(0.0, f64::max);

    let mut doc = SvgDocument::new(config.width, config.height);
    let frame = PlotFrame::new(
        doc.width(),
        doc.height(),
        Margins::default(),
        0.0,
        max_mean + max_std + 1.0,
    );
    frame.draw_titles(
        &mut doc,
        "Mean species richness by bait and site",
        "Bait",
        "Mean species richness",
    );
    frame.draw_axes(&mut doc, 5);

    let group_width = frame.width() / baits.len() as f64;
    let slot = group_width / sites.len() as f64;
    let bar_width = slot * 0.7;

    for (i, (bait, _)) in baits.iter().enumerate() {
        let group_x = frame.left + i as f64 * group_width;
        for (j, site) in sites.iter().enumerate() {
            let Some(&(mean, std)) = cells.get(&(bait.to_string(), site.clone())) else {
                continue;
            };
            let x = group_x + (j as f64 + 0.15) * slot;
            let top = frame.y(mean);
            doc.rect(
                x,
                top,
                bar_width,
                frame.bottom - top,
                &Style::fill(config.color_for(site)).opacity(BAR_OPACITY),
            );

            // error bar clipped at the axis floor
            let cx = x + bar_width / 2.0;
            let y_low = frame.y((mean - std).max(frame.y_min));
            let y_high = frame.y(mean + std);
            doc.line(cx, y_low, cx, y_high)
                .line(cx - 4.0, y_low, cx + 4.0, y_low)
                .line(cx - 4.0, y_high, cx + 4.0, y_high);
        }
        frame.category_label(&mut doc, group_x + group_width / 2.0, bait);
    }

    let legend_x = doc.width() - Margins::default().right - 120.0;
    let legend_y = frame.top + 10.0;
    for (k, site) in sites.iter().enumerate() {
        let y = legend_y + k as f64 * 18.0;
        doc.rect(legend_x, y, 12.0, 12.0, &Style::fill(config.color_for(site)))
            .text(legend_x + 18.0, y + 10.0, site, 12, Anchor::Start);
    }

    Ok(doc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Detection;
    use crate::visualization::fmt_num;

    fn record(name: &str, richness: usize) -> CoralReefRecord {
        let rows: Vec<Detection> = (0..richness)
            .map(|i| Detection::new(format!("species {i}"), "1"))
            .collect();
        CoralReefRecord::from_detections(name, &rows).unwrap()
    }

    fn sample() -> Vec<CoralReefRecord> {
        vec![
            record("20241025-milimani-squid-c1.csv", 4),
            record("20241025-utumbi-squid-c2.csv", 6),
            record("20241026-milimani-tuna-c1.csv", 9),
            record("20241026-milimani-tuna-c3.csv", 7),
            record("20241027-utumbi-mackerel-c2.csv", 2),
        ]
    }

    #[test]
    fn test_richness_by_bait_ordered_by_mean() {
        let groups = richness_by_bait(&sample());
        let order: Vec<&str> = groups.iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(order, vec!["tuna", "squid", "mackerel"]);
        assert_eq!(groups[0].1, vec![9.0, 7.0]);
    }

    #[test]
    fn test_box_plot_structure() {
        let svg = render_richness_box_plot(&sample(), &ChartConfig::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Species richness per bait (coral reef reports)"));
        assert_eq!(svg.matches("<circle").count(), 5);
        // one box per bait
        assert_eq!(svg.matches(&format!("fill='{BOX_FILL}'")).count(), 3);
        let tuna = svg.find(">tuna<").unwrap();
        let mackerel = svg.find(">mackerel<").unwrap();
        assert!(tuna < mackerel);
    }

    #[test]
    fn test_box_plot_is_reproducible() {
        let config = ChartConfig::default();
        let a = render_richness_box_plot(&sample(), &config).unwrap();
        let b = render_richness_box_plot(&sample(), &config).unwrap();
        assert_eq!(a, b);

        let other = ChartConfig {
            jitter_seed: 7,
            ..ChartConfig::default()
        };
        let c = render_richness_box_plot(&sample(), &other).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_input_is_insufficient() {
        let config = ChartConfig::default();
        assert!(matches!(
            render_richness_box_plot(&[], &config),
            Err(SurveyError::InsufficientData(_))
        ));
        assert!(matches!(
            render_bait_site_bar_chart(&[], &config),
            Err(SurveyError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_bar_chart_bars_and_legend() {
        let config = ChartConfig::default();
        let svg = render_bait_site_bar_chart(&sample(), &config).unwrap();
        assert!(svg.contains("Mean species richness by bait and site"));
        // squid: milimani + utumbi, tuna: milimani, mackerel: utumbi, plus two legend swatches
        let milimani = svg.matches("fill='#4daf4a'").count();
        let utumbi = svg.matches("fill='#984ea3'").count();
        assert_eq!(milimani, 3);
        assert_eq!(utumbi, 3);
        assert!(svg.contains(">milimani</text>"));
        assert!(svg.contains(">utumbi</text>"));
    }

    #[test]
    fn test_bars_are_translucent_without_outline() {
        let svg = render_bait_site_bar_chart(&sample(), &ChartConfig::default()).unwrap();
        let bars: Vec<&str> = svg
            .lines()
            .filter(|l| l.starts_with("<rect") && l.contains("fill='#4daf4a'"))
            .collect();
        // two bars and the legend swatch
        assert_eq!(bars.len(), 3);
        assert_eq!(bars.iter().filter(|l| l.contains("opacity='0.85'")).count(), 2);
        assert!(bars.iter().all(|l| !l.contains("stroke=")));
    }

    #[test]
    fn test_error_bar_clipped_at_axis_floor() {
        // richness 1 and 9 at one site: mean 5, sd sqrt(32) > mean
        let records = vec![
            record("20241025-milimani-squid-c1.csv", 1),
            record("20241026-milimani-squid-c2.csv", 9),
        ];
        let config = ChartConfig::default();
        let svg = render_bait_site_bar_chart(&records, &config).unwrap();

        let sd = 32f64.sqrt();
        let frame = PlotFrame::new(
            config.width as f64,
            config.height as f64,
            Margins::default(),
            0.0,
            5.0 + sd + 1.0,
        );
        // a single bar spans 70% of the only slot, centred on the plot
        let cx = frame.left + frame.width() / 2.0;
        let y_low = fmt_num(frame.bottom);
        let y_high = fmt_num(frame.y(5.0 + sd));
        let (l, r) = (fmt_num(cx - 4.0), fmt_num(cx + 4.0));

        let lower_cap = format!("<line x1='{l}' y1='{y_low}' x2='{r}' y2='{y_low}'");
        let upper_cap = format!("<line x1='{l}' y1='{y_high}' x2='{r}' y2='{y_high}'");
        let whisker = format!("<line x1='{c}' y1='{y_low}' x2='{c}' y2='{y_high}'", c = fmt_num(cx));
        assert!(svg.contains(&lower_cap), "{svg}");
        assert!(svg.contains(&upper_cap), "{svg}");
        assert!(svg.contains(&whisker), "{svg}");
        // nothing drawn below the x axis
        assert!(!svg.contains(&format!("y1='{}'", fmt_num(frame.y(5.0 - sd)))));
    }

    #[test]
    fn test_bar_chart_unknown_site_uses_fallback_colour() {
        let records = vec![record("20241025-kanamai-squid-c1.csv", 3)];
        let svg = render_bait_site_bar_chart(&records, &ChartConfig::default()).unwrap();
        assert!(svg.contains("fill='#a6cee3'"));
    }

    #[test]
    fn test_bar_chart_escapes_labels() {
        let records = vec![record("20241025-milimani-squid&tuna-c1.csv", 3)];
        let svg = render_bait_site_bar_chart(&records, &ChartConfig::default()).unwrap();
        assert!(svg.contains("squid&amp;tuna"));
        assert!(!svg.contains("squid&tuna"));
    }
}
