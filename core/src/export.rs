//! CSV and spreadsheet export of the shift matrix.
//!
//! Both formats carry the same table: header `名前,役職,1日(月),...`, then
//! one row per employee in display order. A worked day shows its band
//! (`9:00-17:00`), a day off shows `休`.
//!
//! CSV: UTF-8 with a leading BOM and `\n` line endings.
//! XLSX: a single sheet titled `{year}年{month}月シフト`, every cell a string.

use crate::{calendar::Month, error::ShiftResult, report::ShiftMatrix};
use rust_xlsxwriter::Workbook;
use std::{fs::File, io::Write, path::Path};

pub const DAY_OFF: &str = "休";
const BOM: &[u8] = "\u{feff}".as_bytes();

/// Default download name, e.g. `shift_2024_10.csv`.
pub fn csv_file_name(month: Month) -> String {
    format!("shift_{}_{}.csv", month.year(), month.month())
}

/// Default download name, e.g. `shift_2024_10.xlsx`.
pub fn xlsx_file_name(month: Month) -> String {
    format!("shift_{}_{}.xlsx", month.year(), month.month())
}

/// Worksheet title, e.g. `2024年10月シフト`.
pub fn sheet_title(month: Month) -> String {
    format!("{}年{}月シフト", month.year(), month.month())
}

/// The exported table, header first.
pub fn table_rows(matrix: &ShiftMatrix) -> Vec<Vec<String>> {
    let mut header = vec!["名前".to_string(), "役職".to_string()];
    header.extend(
        matrix
            .days
            .iter()
            .map(|d| format!("{}日({})", chrono::Datelike::day(&d.date), d.weekday_name)),
    );

    let mut table = Vec::with_capacity(matrix.rows.len() + 1);
    table.push(header);
    for row in &matrix.rows {
        let mut record = vec![row.name.clone(), row.role.label().to_string()];
        record.extend(
            row.cells
                .iter()
                .map(|c| c.time_band.map_or(DAY_OFF, |b| b.label()).to_string()),
        );
        table.push(record);
    }
    table
}

pub fn write_csv<W: Write>(matrix: &ShiftMatrix, mut out: W) -> ShiftResult<()> {
    out.write_all(BOM)?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    for record in table_rows(matrix) {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_xlsx<W: Write>(matrix: &ShiftMatrix, mut out: W) -> ShiftResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_title(matrix.month))?;
    for (r, record) in table_rows(matrix).iter().enumerate() {
        for (c, value) in record.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, value)?;
        }
    }
    out.write_all(&workbook.save_to_buffer()?)?;
    Ok(())
}

pub fn export_csv_file(matrix: &ShiftMatrix, path: impl AsRef<Path>) -> ShiftResult<()> {
    let file = File::create(path.as_ref())?;
    write_csv(matrix, file)?;
    log::info!(
        "{} export: wrote {} rows to {}",
        matrix.month,
        matrix.rows.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn export_xlsx_file(matrix: &ShiftMatrix, path: impl AsRef<Path>) -> ShiftResult<()> {
    let file = File::create(path.as_ref())?;
    write_xlsx(matrix, file)?;
    log::info!(
        "{} export: wrote {} rows to {}",
        matrix.month,
        matrix.rows.len(),
        path.as_ref().display()
    );
    Ok(())
}
