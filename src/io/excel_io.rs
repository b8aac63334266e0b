use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::analysis::GroupedTable;
use crate::error::SurveyError;
use crate::models::FileSummary;

use super::{ensure_parent_dir, SUMMARY_HEADERS};

fn write_headers(worksheet: &mut Worksheet, headers: &[impl AsRef<str>]) -> Result<(), SurveyError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header.as_ref())?;
    }
    Ok(())
}

fn write_summary_sheet(worksheet: &mut Worksheet, summaries: &[FileSummary]) -> Result<(), SurveyError> {
    write_headers(worksheet, &SUMMARY_HEADERS)?;

    for (i, s) in summaries.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &s.file_name)?;
        worksheet.write_string(row, 1, s.area_type.to_string())?;
        worksheet.write_string(row, 2, s.location.to_string())?;
        worksheet.write_string(row, 3, &s.date)?;
        worksheet.write_string(row, 4, &s.bait_type)?;
        worksheet.write_number(row, 5, s.species_richness as f64)?;
        worksheet.write_number(row, 6, s.total_observations as f64)?;
        worksheet.write_number(row, 7, s.maxn_overall as f64)?;
        worksheet.write_number(row, 8, s.obs_per_species_mean)?;
        if let Some(sd) = s.obs_per_species_sd {
            worksheet.write_number(row, 9, sd)?;
        }
        worksheet.write_number(row, 10, s.shannon_h)?;
        worksheet.write_number(row, 11, s.simpson_d)?;
        worksheet.write_number(row, 12, s.pielou_j)?;
        worksheet.write_number(row, 13, s.unique_frames as f64)?;
        worksheet.write_number(row, 14, s.obs_per_frame)?;
        worksheet.write_string(row, 15, &s.top_3_species)?;
    }
    Ok(())
}

fn write_grouped_sheet(worksheet: &mut Worksheet, table: &GroupedTable) -> Result<(), SurveyError> {
    write_headers(worksheet, &table.headers())?;

    let offset = table.key_columns.len();
    for (i, group) in table.rows.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, key) in group.keys.iter().enumerate() {
            worksheet.write_string(row, col as u16, key)?;
        }
        for (col, value) in group.values.iter().enumerate() {
            if let Some(v) = value {
                worksheet.write_number(row, (offset + col) as u16, *v)?;
            }
        }
    }
    Ok(())
}

/// Write the per-file table and each grouped table to its own worksheet.
pub fn write_workbook(
    summaries: &[FileSummary],
    grouped: &[(&str, &GroupedTable)],
    path: impl AsRef<Path>,
) -> Result<(), SurveyError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Files")?;
    write_summary_sheet(sheet, summaries)?;

    for (name, table) in grouped {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        write_grouped_sheet(sheet, table)?;
    }

    workbook.save(path)?;
    Ok(())
}
