//! Output formatting and persistence for scrape results.
//!
//! Raw section rows go to an append-only CSV (re-readable by the
//! `summarize` subcommand); the instructor summary goes to a single-sheet
//! xlsx workbook with the fixed column schema.

use anyhow::Result;
use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::load::schema;
use crate::load::types::{InstructorSummaryRow, RawCourseRow};

/// Logs the instructor summary as pretty-printed JSON.
pub fn print_json(rows: &[InstructorSummaryRow]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Appends a [`RawCourseRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_raw_record(path: &str, row: &RawCourseRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending raw CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}

/// Reads a raw-rows CSV dump back into memory.
pub fn read_raw_records(path: &str) -> Result<Vec<RawCourseRow>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawCourseRow = result?;
        rows.push(record);
    }

    debug!(path, rows = rows.len(), "Raw CSV records loaded");
    Ok(rows)
}

/// Writes the instructor summary as a single-sheet xlsx workbook.
///
/// Column order and header text come from [`schema::SUMMARY_COLUMNS`];
/// the header row is bold.
pub fn write_workbook(
    path: &str,
    sheet_name: &str,
    rows: &[InstructorSummaryRow],
) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let bold = Format::new().set_bold();
    for (col, label) in schema::header_labels().enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.last_name)?;
        worksheet.write_string(r, 1, &row.first_name)?;
        worksheet.write_number(r, 2, row.ug_class_count)?;
        worksheet.write_number(r, 3, row.ug_student_count)?;
        worksheet.write_number(r, 4, row.ug_superv_class_count)?;
        worksheet.write_number(r, 5, row.ug_superv_student_count)?;
        worksheet.write_number(r, 6, row.grad_class_count)?;
        worksheet.write_number(r, 7, row.grad_student_count)?;
        worksheet.write_number(r, 8, row.grad_superv_class_count)?;
        worksheet.write_number(r, 9, row.grad_superv_student_count)?;
        worksheet.write_string(r, 10, &row.note)?;
    }

    workbook.save(path)?;
    info!(path, sheet = sheet_name, instructors = rows.len(), "Workbook written");
    Ok(())
}

/// Logs per-instructor totals for the first 10 instructors, plus an
/// overflow count.
pub fn log_summary(rows: &[InstructorSummaryRow]) {
    for row in rows.iter().take(10) {
        info!(
            last = %row.last_name,
            first = %row.first_name,
            ug_classes = row.ug_class_count,
            ug_students = row.ug_student_count,
            grad_classes = row.grad_class_count,
            grad_students = row.grad_student_count,
            "Instructor load"
        );
    }

    if rows.len() > 10 {
        info!(more = rows.len() - 10, "Additional instructors not shown");
    }
}
