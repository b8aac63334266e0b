use std::fs;
use std::path::Path;

use assert_approx_eq::assert_approx_eq;
use tempfile::TempDir;

use reef_survey_analyzer::{
    analysis::{
        coral_reef_records, richness_reports, summarize_file, summarize_sources, CoralReefRecord,
    },
    config::ChartConfig,
    io::{self, read_detections_from_bytes},
    models::{AreaType, Detection, Location, FRAMES, LABEL_NAME},
    visualization::{render_bait_site_bar_chart, render_richness_box_plot},
    AnalyzerConfig, CollectingSink, CoralReefAnalysis, CsvFormat, RichnessAnalysis,
    SummaryWriter, SurveyAnalysis, SurveyError,
};

const HEADER: &str = "label_name,label_hierarchy,frames,confidence";

fn report(rows: &[(&str, &str)]) -> String {
    let mut out = String::from(HEADER);
    for (label, frame) in rows {
        out.push_str(&format!("\n{label},Fish/{label},{frame},0.9"));
    }
    out.push('\n');
    out
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

/// Base directory laid out like a field season: two reef reports, one broken
/// export and one nursery report.
fn survey_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let reef = tmp.path().join("Annotation_reports_coral_reef");
    let nursery = tmp.path().join("Annotation_reports_Nursery");

    write(
        &reef,
        "25102024-utumbi-c1-squid-ganz.csv",
        &report(&[
            ("Chromis viridis", "1"),
            ("Chromis viridis", "1"),
            ("Scarus sp.", "1"),
            ("Chromis viridis", "2"),
            ("Lutjanus sp.", "3"),
        ]),
    );
    write(
        &reef,
        "26102024-milimani-c2-tuna-ganz.csv",
        &report(&[("Chromis viridis", "1"), ("Scarus sp.", "2")]),
    );
    write(&reef, "27102024-utumbi-c3-squid-ganz.csv", "species;frame\nChromis;1\n");
    write(
        &nursery,
        "28102024-milimani-c1-mackerel-ganz.csv",
        &report(&[("Siganus sp.", "4")]),
    );
    tmp
}

#[test]
fn test_reference_counts() {
    let rows = vec![
        Detection::new("A", "f1"),
        Detection::new("A", "f1"),
        Detection::new("B", "f1"),
        Detection::new("A", "f2"),
    ];
    let s = summarize_file("25102024-utumbi-c1-squid-ganz.csv", AreaType::CoralReef, &rows).unwrap();
    assert_eq!(s.species_richness, 2);
    assert_eq!(s.maxn_overall, 2);
    assert_eq!(s.total_observations, 4);
    assert_eq!(s.unique_frames, 2);
    assert_eq!(s.obs_per_frame, 2.0);
    assert_eq!(s.date, "25.10.2024");
    assert_eq!(s.bait_type, "squid");
    assert_eq!(s.location, Location::Utumbi);
}

#[test]
fn test_unmatched_name_is_kept_with_unknown_bait() {
    let rows = vec![Detection::new("A", "1")];
    let s = summarize_file("reef survey.csv", AreaType::Nursery, &rows).unwrap();
    assert_eq!(s.bait_type, "unknown");
    assert_eq!(s.species_richness, 1);
}

#[test]
fn test_comprehensive_pipeline_isolates_corrupt_file() {
    let tmp = survey_tree();
    let config = AnalyzerConfig::default();
    let mut sink = CollectingSink::new();

    let summaries = summarize_sources(&config.source_dirs(tmp.path()), &mut sink).unwrap();
    assert_eq!(summaries.len(), 3);

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].file.as_deref(),
        Some("27102024-utumbi-c3-squid-ganz.csv")
    );

    let analysis = SurveyAnalysis::from_summaries(summaries);
    assert_eq!(analysis.summaries[0].file_name, "25102024-utumbi-c1-squid-ganz.csv");
    assert_eq!(analysis.summaries[0].species_richness, 3);
    assert_eq!(analysis.summaries[0].maxn_overall, 2);
    assert_eq!(analysis.by_area.value(&["Coral Reef"], "file_count"), Some(2.0));
    assert_eq!(analysis.by_area.value(&["Nursery"], "file_count"), Some(1.0));
    assert_approx_eq!(
        analysis.by_area.value(&["Coral Reef"], "richness_mean").unwrap(),
        2.5
    );

    // group counts add back up to the number of analysed files
    let total: f64 = analysis
        .by_bait
        .rows
        .iter()
        .filter_map(|r| r.values[0])
        .sum();
    assert_eq!(total as usize, analysis.summaries.len());
}

#[test]
fn test_comprehensive_outputs_written() {
    let tmp = survey_tree();
    let out = tmp.path().join("results");
    let config = AnalyzerConfig::default();
    let mut sink = CollectingSink::new();

    let summaries = summarize_sources(&config.source_dirs(tmp.path()), &mut sink).unwrap();
    let analysis = SurveyAnalysis::from_summaries(summaries);

    CsvFormat
        .write(&analysis.summaries, &out.join("comprehensive_analysis_table.csv"))
        .unwrap();
    io::write_grouped_table(&analysis.by_location, out.join("statistics_by_location.csv")).unwrap();
    io::write_workbook(
        &analysis.summaries,
        &analysis.grouped_sheets(),
        out.join("comprehensive_analysis.xlsx"),
    )
    .unwrap();

    let table = fs::read_to_string(out.join("comprehensive_analysis_table.csv")).unwrap();
    let header = table.lines().next().unwrap();
    assert!(header.starts_with("file_name,area_type,location,date,bait_type,species_richness"));
    assert_eq!(table.lines().count(), 4);

    let by_location = fs::read_to_string(out.join("statistics_by_location.csv")).unwrap();
    assert!(by_location.starts_with("location,area_type,file_count,richness_mean"));
    assert!(out.join("comprehensive_analysis.xlsx").exists());
}

#[test]
fn test_missing_source_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = AnalyzerConfig::default();
    let mut sink = CollectingSink::new();

    let err = summarize_sources(&config.source_dirs(tmp.path()), &mut sink).unwrap_err();
    assert!(matches!(err, SurveyError::DirectoryNotFound(_)));
    assert!(err.to_string().starts_with("Directory not found"));
}

#[test]
fn test_coral_reef_pipeline_and_charts() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("reef");
    write(&dir, "20241025-milimani-mackerel-c10.csv", &report(&[("A", "1"), ("B", "1")]));
    write(&dir, "20241025-utumbi-mackerel-c2.csv", &report(&[("A", "1")]));
    write(&dir, "20241026-utumbi-sardine-squid.csv", &report(&[("A", "1"), ("C", "2"), ("D", "2")]));
    write(&dir, "20241027-utumbi-tuna-c1.csv", HEADER);

    let mut sink = CollectingSink::new();
    let records = coral_reef_records(&dir, &mut sink).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(sink.warnings().len(), 1);

    let dashed = records
        .iter()
        .find(|r| r.file_name == "20241026-utumbi-sardine-squid.csv")
        .unwrap();
    assert_eq!(dashed.bait, "sardine-squid");
    assert!(dashed.camera.is_none());

    let analysis = CoralReefAnalysis::new(records);
    assert_eq!(analysis.by_bait.rows[0].keys, vec!["sardine-squid"]);
    assert_eq!(analysis.by_bait.value(&["mackerel"], "mean"), Some(1.5));

    let charts = ChartConfig::default();
    let box_plot = render_richness_box_plot(&analysis.records, &charts).unwrap();
    let bars = render_bait_site_bar_chart(&analysis.records, &charts).unwrap();

    let figures = tmp.path().join("results").join("figures");
    io::write_svg(&box_plot, figures.join("species_richness_by_bait.svg")).unwrap();
    io::write_svg(&bars, figures.join("species_richness_by_bait_site.svg")).unwrap();

    let svg = fs::read_to_string(figures.join("species_richness_by_bait.svg")).unwrap();
    assert!(svg.contains("sardine-squid"));
    assert_eq!(svg.matches("<circle").count(), 3);
}

#[test]
fn test_charts_need_data() {
    let records: Vec<CoralReefRecord> = Vec::new();
    let err = render_richness_box_plot(&records, &ChartConfig::default()).unwrap_err();
    assert!(matches!(err, SurveyError::InsufficientData(_)));
}

#[test]
fn test_richness_pipeline() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Annotation_reports");
    write(
        &dir,
        "25102024-utumbi-c4-squid-ganz.csv",
        "label_name,label_hierarchy\nA,Fish/A\nA,Fish/A\nB,Fish/B\nC,\n",
    );
    write(&dir, "reef.csv", "label_name\nA\n");

    let mut sink = CollectingSink::new();
    let analysis = RichnessAnalysis::new(richness_reports(&dir, &mut sink).unwrap());
    assert!(sink.warnings().is_empty());

    let comparison = analysis.comparison();
    assert_eq!(comparison[0].species_richness, 3);
    assert_eq!(comparison[0].bait_info.as_deref(), Some("squid"));
    assert_eq!(comparison[0].observations_per_species, 1.33);
    assert!(comparison[1].date.is_none());

    let detailed = analysis.detailed();
    assert_eq!(detailed.len(), 4);
    assert!(detailed.iter().any(|s| s.label_name == "C" && s.label_hierarchy.is_empty()));

    let path = tmp.path().join("results").join("species_richness_comparison.csv");
    io::write_records(&comparison, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(
        "file_name,species_richness,total_observations,location,date,bait_info,observations_per_species"
    ));
}

#[test]
fn test_listing_sorted_per_folder() {
    let tmp = survey_tree();
    write(
        &tmp.path().join("Annotation_reports_Nursery"),
        "01012024-utumbi-c1-squid-ganz.CSV",
        HEADER,
    );
    let config = AnalyzerConfig::default();
    let output = tmp.path().join(&config.listing_path);

    let count = io::write_listing(tmp.path(), &config.source_folders(), &output).unwrap();
    assert_eq!(count, 5);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Annotation reports (sorted)");
    assert_eq!(lines[2], "## Annotation_reports_coral_reef");
    assert_eq!(lines[4], "- 25102024-utumbi-c1-squid-ganz.csv");
    let nursery = lines
        .iter()
        .position(|l| *l == "## Annotation_reports_Nursery")
        .unwrap();
    assert_eq!(lines[nursery + 2], "- 01012024-utumbi-c1-squid-ganz.CSV");
}

#[test]
fn test_missing_required_column_named() {
    let err = read_detections_from_bytes(b"label_name\nA\n", "x.csv", &[LABEL_NAME, FRAMES])
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing column 'frames' in x.csv");
}

#[test]
fn test_config_file_drives_layout() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("Reef"), "a.csv", &report(&[("A", "1")]));
    let config_path = tmp.path().join("reef.toml");
    fs::write(
        &config_path,
        "[[sources]]\nfolder = \"Reef\"\narea = \"Coral Reef\"\n",
    )
    .unwrap();

    let config = AnalyzerConfig::load(&config_path).unwrap();
    let mut sink = CollectingSink::new();
    let summaries = summarize_sources(&config.source_dirs(tmp.path()), &mut sink).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].area_type, AreaType::CoralReef);
}
