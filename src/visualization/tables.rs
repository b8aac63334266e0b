use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{CoralReefRecord, GroupedTable, RichnessRecord, RichnessReport};
use crate::models::FileSummary;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn heading(title: &str, width: usize) -> String {
    format!("\n{}\n{}\n", title.bold().green(), "=".repeat(width))
}

/// Format the per-video summary table as a string.
pub fn format_survey_table(summaries: &[FileSummary]) -> String {
    let mut output = heading("Comprehensive Analysis", 70);
    if summaries.is_empty() {
        output.push_str("  No reports analysed.\n");
        return output;
    }

    let mut table = new_table(vec![
        "File", "Area", "Location", "Date", "Bait", "Richness", "Obs.", "MaxN", "Shannon H'",
        "Pielou J'",
    ]);
    for s in summaries {
        table.add_row(vec![
            Cell::new(&s.file_name),
            Cell::new(s.area_type),
            Cell::new(s.location),
            Cell::new(&s.date),
            Cell::new(&s.bait_type),
            Cell::new(s.species_richness),
            Cell::new(s.total_observations),
            Cell::new(s.maxn_overall),
            Cell::new(format!("{:.3}", s.shannon_h)),
            Cell::new(format!("{:.3}", s.pielou_j)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the per-video summary table.
pub fn print_survey_table(summaries: &[FileSummary]) {
    print!("{}", format_survey_table(summaries));
}

/// Format a grouped statistics table under `title`. Undefined values show as `-`.
pub fn format_grouped_table(title: &str, grouped: &GroupedTable) -> String {
    let mut output = heading(title, 50);

    let headers = grouped.headers();
    let mut table = new_table(headers.iter().map(String::as_str).collect());
    for row in &grouped.rows {
        let cells = row
            .keys
            .iter()
            .map(Cell::new)
            .chain(row.values.iter().map(|v| match v {
                Some(x) => Cell::new(x),
                None => Cell::new("-"),
            }));
        table.add_row(cells.collect::<Vec<_>>());
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print a grouped statistics table.
pub fn print_grouped_table(title: &str, grouped: &GroupedTable) {
    print!("{}", format_grouped_table(title, grouped));
}

/// Format the richness comparison, one row per report.
pub fn format_richness_comparison(records: &[RichnessRecord]) -> String {
    let mut output = heading("Species Richness Comparison", 60);

    let mut table = new_table(vec![
        "File", "Location", "Date", "Bait", "Richness", "Obs.", "Obs./species",
    ]);
    for r in records {
        table.add_row(vec![
            Cell::new(&r.file_name),
            Cell::new(r.location),
            Cell::new(r.date.as_deref().unwrap_or("-")),
            Cell::new(r.bait_info.as_deref().unwrap_or("-")),
            Cell::new(r.species_richness),
            Cell::new(r.total_observations),
            Cell::new(format!("{:.2}", r.observations_per_species)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the richness comparison.
pub fn print_richness_comparison(records: &[RichnessRecord]) {
    print!("{}", format_richness_comparison(records));
}

/// Format the `limit` most observed species of one report.
pub fn format_top_species(report: &RichnessReport, limit: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{} {}\n",
        report.record.file_name.bold(),
        format!(
            "({} species, {} observations)",
            report.record.species_richness, report.record.total_observations
        )
        .dimmed()
    ));

    let mut table = new_table(vec!["Species", "Hierarchy", "Count"]);
    for sp in report.species.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&sp.label_name),
            Cell::new(&sp.label_hierarchy),
            Cell::new(sp.count),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the top species of one report.
pub fn print_top_species(report: &RichnessReport, limit: usize) {
    print!("{}", format_top_species(report, limit));
}

/// Format the coral reef richness table.
pub fn format_coral_reef_table(records: &[CoralReefRecord]) -> String {
    let mut output = heading("Coral Reef Species Richness", 60);

    let mut table = new_table(vec!["File", "Date", "Site", "Bait", "Camera", "Richness"]);
    for r in records {
        table.add_row(vec![
            Cell::new(&r.file_name),
            Cell::new(&r.date),
            Cell::new(&r.site),
            Cell::new(&r.bait),
            Cell::new(r.camera.as_deref().unwrap_or("-")),
            Cell::new(r.species_richness),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the coral reef richness table.
pub fn print_coral_reef_table(records: &[CoralReefRecord]) {
    print!("{}", format_coral_reef_table(records));
}
