use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::table::{Table, Value};

/// Excel caps sheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Write each table to its own worksheet, numbers as numbers.
pub fn export_xlsx(path: &Path, tables: &[&Table]) -> Result<()> {
    let mut workbook = Workbook::new();
    for (idx, table) in tables.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&table.label, idx))?;
        write_table(sheet, table)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

/// One JSON object per row, keyed by column name.
pub fn export_json(path: &Path, table: &Table) -> Result<()> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .zip(row)
                .map(|(name, value)| {
                    let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                    (name.clone(), json)
                })
                .collect()
        })
        .collect();
    let json = serde_json::to_string_pretty(&records).context("serialize table")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn sheet_name(label: &str, idx: usize) -> String {
    let cleaned: String = label
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(MAX_SHEET_NAME)
        .collect();
    if cleaned.trim().is_empty() {
        format!("Sheet{}", idx + 1)
    } else {
        cleaned
    }
}

fn write_table(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col_idx, name) in table.columns.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, name)
            .with_context(|| format!("write header ({col_idx})"))?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col_idx, value) in row.iter().enumerate() {
            let c = col_idx as u16;
            let written = match value {
                Value::Text(s) => worksheet.write_string(r, c, s),
                Value::Int(v) => worksheet.write_number(r, c, *v as f64),
                Value::Float(v) => worksheet.write_number(r, c, *v),
            };
            written.with_context(|| format!("write cell ({r},{col_idx})"))?;
        }
    }
    Ok(())
}
