mod charts;
mod svg;
mod tables;

pub use charts::{render_bait_site_bar_chart, render_richness_box_plot};
pub use svg::{
    escape_text, fmt_num, linspace, scale, Anchor, Margins, PlotFrame, Style, SvgDocument,
};
pub use tables::{
    format_coral_reef_table, format_grouped_table, format_richness_comparison,
    format_survey_table, format_top_species, print_coral_reef_table, print_grouped_table,
    print_richness_comparison, print_survey_table, print_top_species,
};
