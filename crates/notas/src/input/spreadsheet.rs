//! Workbook reader (xlsx, xlsm, xls, ods) backed by calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{NotasError, Result};
use super::source::DataTable;

/// Read one worksheet; the first non-blank row is the header row.
///
/// Every cell is rendered to text exactly as calamine displays it, so whole
/// numbers stored as floats come back as `"85"` rather than `"85.0"`.
pub fn read_sheet(contents: Vec<u8>, sheet: &str) -> Result<DataTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(contents))?;

    let available = workbook.sheet_names();
    let matched: Option<String> = available
        .iter()
        .find(|name| name.as_str() == sheet)
        .or_else(|| available.iter().find(|name| name.trim().eq_ignore_ascii_case(sheet.trim())))
        .cloned();
    let Some(sheet_name) = matched else {
        return Err(NotasError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    };

    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
        .filter(|row| !DataTable::is_blank_row(row));

    let headers = rows
        .next()
        .ok_or_else(|| NotasError::EmptyData(format!("Sheet '{sheet_name}' is empty")))?;
    let rows: Vec<Vec<String>> = rows.collect();

    Ok(DataTable::new(headers, rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
