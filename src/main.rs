use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reef_survey_analyzer::{
    analysis::{coral_reef_records, richness_reports, summarize_sources, CoralReefRecord},
    config::ChartConfig,
    io::{self, CsvFormat, JsonFormat, SummaryWriter},
    models::FileSummary,
    visualization::{
        print_coral_reef_table, print_grouped_table, print_richness_comparison,
        print_survey_table, print_top_species, render_bait_site_bar_chart,
        render_richness_box_plot,
    },
    AnalyzerConfig, CoralReefAnalysis, RichnessAnalysis, SurveyAnalysis, SurveyError,
    TracingSink,
};

const TOP_SPECIES: usize = 10;

#[derive(Parser)]
#[command(
    name = "reef-analyzer",
    about = "Reef Survey Analyzer - species richness and diversity of annotated video reports",
    version,
    author
)]
struct Cli {
    /// TOML config file with folder layout and chart settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the annotation report folders
    #[arg(short, long, global = true, default_value = ".")]
    base_dir: PathBuf,

    /// Output directory (default: <base-dir>/results)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy, Default)]
struct ExportArgs {
    /// Also write the per-file table as JSON
    #[arg(long)]
    json: bool,

    /// Also write all tables to an Excel workbook
    #[arg(long)]
    xlsx: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-video diversity table and grouped statistics across all sources
    Comprehensive {
        #[command(flatten)]
        export: ExportArgs,
    },

    /// Compare species richness across the richness report folder
    Richness,

    /// Coral reef richness tables and charts
    CoralReef,

    /// Write a sorted Markdown listing of the report files
    List,

    /// Run every analysis
    All {
        #[command(flatten)]
        export: ExportArgs,
    },
}

/// Input and output locations after applying CLI overrides.
struct Workspace {
    config: AnalyzerConfig,
    base_dir: PathBuf,
    output_dir: PathBuf,
}

impl Workspace {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => AnalyzerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => AnalyzerConfig::default(),
        };
        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| cli.base_dir.join(&config.output_dir));
        Ok(Self {
            config,
            base_dir: cli.base_dir.clone(),
            output_dir,
        })
    }

    fn output(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    fn figure(&self, file_name: &str) -> PathBuf {
        self.output_dir.join("figures").join(file_name)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_comprehensive(ws: &Workspace, export: ExportArgs) -> Result<()> {
    println!("\n{}", "Comprehensive Analysis".bold().cyan());

    let sources = ws.config.source_dirs(&ws.base_dir);
    let summaries: Vec<FileSummary> = summarize_sources(&sources, &mut TracingSink)?;
    if summaries.is_empty() {
        warn!("No reports could be analysed, writing empty tables");
    }

    let analysis = SurveyAnalysis::from_summaries(summaries);
    print_survey_table(&analysis.summaries);
    print_grouped_table("Statistics by Area", &analysis.by_area);
    print_grouped_table("Statistics by Location", &analysis.by_location);
    print_grouped_table("Statistics by Bait", &analysis.by_bait);

    CsvFormat.write(&analysis.summaries, &ws.output("comprehensive_analysis_table.csv"))?;
    io::write_grouped_table(&analysis.by_area, ws.output("statistics_by_area.csv"))?;
    io::write_grouped_table(&analysis.by_location, ws.output("statistics_by_location.csv"))?;
    io::write_grouped_table(&analysis.by_bait, ws.output("statistics_by_bait.csv"))?;

    if export.json {
        let path = ws.output("comprehensive_analysis_table.json");
        JsonFormat { pretty: true }.write(&analysis.summaries, &path)?;
    }
    if export.xlsx {
        io::write_workbook(
            &analysis.summaries,
            &analysis.grouped_sheets(),
            ws.output("comprehensive_analysis.xlsx"),
        )?;
    }

    info!(
        files = analysis.summaries.len(),
        "Comprehensive results written to {}",
        ws.output_dir.display()
    );
    Ok(())
}

fn run_richness(ws: &Workspace) -> Result<()> {
    println!("\n{}", "Species Richness".bold().cyan());

    let dir = ws.base_dir.join(&ws.config.richness_dir);
    let analysis = RichnessAnalysis::new(richness_reports(&dir, &mut TracingSink)?);

    for report in &analysis.reports {
        print_top_species(report, TOP_SPECIES);
    }
    let comparison = analysis.comparison();
    print_richness_comparison(&comparison);

    io::write_records(&comparison, ws.output("species_richness_comparison.csv"))?;
    io::write_records(&analysis.detailed(), ws.output("species_richness_detailed.csv"))?;

    info!(
        files = analysis.reports.len(),
        "Richness results written to {}",
        ws.output_dir.display()
    );
    Ok(())
}

type ChartRenderer = fn(&[CoralReefRecord], &ChartConfig) -> Result<String, SurveyError>;

fn run_coral_reef(ws: &Workspace) -> Result<()> {
    println!("\n{}", "Coral Reef Species Richness".bold().cyan());

    let dir = ws.base_dir.join(&ws.config.coral_reef_dir);
    let analysis = CoralReefAnalysis::new(coral_reef_records(&dir, &mut TracingSink)?);

    print_coral_reef_table(&analysis.records);
    print_grouped_table("Species Richness by Bait", &analysis.by_bait);

    io::write_records(&analysis.records, ws.output("species_richness_coral_reef.csv"))?;
    io::write_grouped_table(&analysis.by_bait, ws.output("species_richness_coral_reef_by_bait.csv"))?;

    let charts: [(&str, ChartRenderer); 2] = [
        ("species_richness_by_bait.svg", render_richness_box_plot),
        ("species_richness_by_bait_site.svg", render_bait_site_bar_chart),
    ];
    for (file_name, render) in charts {
        match render(&analysis.records, &ws.config.charts) {
            Ok(svg) => io::write_svg(&svg, ws.figure(file_name))?,
            Err(SurveyError::InsufficientData(reason)) => {
                warn!(chart = file_name, "Chart skipped: {reason}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        files = analysis.records.len(),
        "Coral reef results written to {}",
        ws.output_dir.display()
    );
    Ok(())
}

fn run_list(ws: &Workspace) -> Result<()> {
    let output = ws.base_dir.join(&ws.config.listing_path);
    let count = io::write_listing(&ws.base_dir, &ws.config.source_folders(), &output)?;
    println!(
        "{} Listed {count} reports in {}",
        "Success:".green().bold(),
        output.display()
    );
    Ok(())
}

fn richness_dir_exists(ws: &Workspace) -> bool {
    ws.base_dir.join(&ws.config.richness_dir).is_dir()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ws = Workspace::new(&cli)?;

    match cli.command {
        Commands::Comprehensive { export } => run_comprehensive(&ws, export)?,
        Commands::Richness => run_richness(&ws)?,
        Commands::CoralReef => run_coral_reef(&ws)?,
        Commands::List => run_list(&ws)?,
        Commands::All { export } => {
            run_list(&ws)?;
            run_comprehensive(&ws, export)?;
            run_coral_reef(&ws)?;
            if richness_dir_exists(&ws) {
                run_richness(&ws)?;
            } else {
                info!(
                    "No {} folder, richness comparison skipped",
                    ws.config.richness_dir.display()
                );
            }
        }
    }

    Ok(())
}
