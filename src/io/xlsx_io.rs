use std::io;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::io::atomic_write_bytes;
use crate::state::grid::Grid;
use crate::state::value::CellValue;

#[derive(Debug)]
pub enum XlsxIoError {
    Io(io::Error),
    Read(calamine::Error),
    Write(XlsxError),
    EmptyWorkbook,
}

impl std::fmt::Display for XlsxIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XlsxIoError::Io(e) => write!(f, "IO error: {e}"),
            XlsxIoError::Read(e) => write!(f, "Failed to parse workbook: {e}"),
            XlsxIoError::Write(e) => write!(f, "Failed to write workbook: {e}"),
            XlsxIoError::EmptyWorkbook => write!(f, "Workbook contains no sheets"),
        }
    }
}

impl std::error::Error for XlsxIoError {}

impl From<io::Error> for XlsxIoError {
    fn from(e: io::Error) -> Self {
        XlsxIoError::Io(e)
    }
}

impl From<calamine::Error> for XlsxIoError {
    fn from(e: calamine::Error) -> Self {
        XlsxIoError::Read(e)
    }
}

impl From<XlsxError> for XlsxIoError {
    fn from(e: XlsxError) -> Self {
        XlsxIoError::Write(e)
    }
}

/// Reads the first sheet of an `.xlsx`/`.xls` workbook into a fresh grid.
///
/// Columns are regenerated positionally as sequential letters with type
/// text, discarding any titles in the payload; the first record is treated
/// as the header row and excluded. Field values are carried unmodified, so
/// typing is assigned by the user afterward. A malformed payload returns a
/// single error and the caller's current model stays untouched.
pub fn import_workbook(path: &Path) -> Result<Grid, XlsxIoError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let first_sheet = sheet_names.first().ok_or(XlsxIoError::EmptyWorkbook)?.clone();
    let range = workbook.worksheet_range(&first_sheet)?;

    let (height, width) = range.get_size();
    let mut grid = Grid::new();
    for _ in 0..width {
        grid.append_column();
    }
    let col_ids = grid.column_ids();

    let mut row_ids = Vec::new();
    for _ in 1..height.max(1) {
        row_ids.push(grid.append_row());
    }

    for (index, record) in range.rows().enumerate().skip(1) {
        let row_id = &row_ids[index - 1];
        for (col_index, cell) in record.iter().enumerate() {
            let Some(value) = import_value(cell) else {
                continue;
            };
            grid.set_cell(row_id, &col_ids[col_index], value);
        }
    }

    Ok(grid)
}

fn import_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        Data::DateTime(dt) => Some(CellValue::Text(dt.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(_) => None,
    }
}

/// Writes the grid as a one-sheet workbook: a header row of column titles
/// followed by one record per row, field order following column order.
/// Primitive values are written verbatim; empty cells become empty strings,
/// so a row with no cells still produces a record with all fields empty.
pub fn export_workbook(grid: &Grid, path: &Path) -> Result<(), XlsxIoError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_index, column) in grid.columns().iter().enumerate() {
        worksheet.write_string(0, col_index as u16, column.title.as_str())?;
    }

    for (row_index, row_id) in grid.rows().iter().enumerate() {
        for (col_index, column) in grid.columns().iter().enumerate() {
            let row = (row_index + 1) as u32;
            let col = col_index as u16;
            match grid.cell_value(row_id, &column.id) {
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                CellValue::Null => {
                    worksheet.write_string(row, col, "")?;
                }
                other => {
                    worksheet.write_string(row, col, other.raw_string())?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    atomic_write_bytes(path, &bytes)?;
    Ok(())
}

/// Date-stamped default used when the host does not supply a filename.
pub fn default_export_filename() -> String {
    format!("gridsheet-{}.xlsx", chrono::Local::now().format("%Y-%m-%d"))
}
