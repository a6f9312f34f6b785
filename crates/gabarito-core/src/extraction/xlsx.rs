use std::io::Cursor;

use calamine::Reader;

use crate::error::GabaritoError;

/// Read the first worksheet of an XLSX/XLS workbook into a dense grid of
/// trimmed cell strings.
///
/// Missing cells become empty strings, so downstream scans can index
/// rows without caring whether a cell was blank or absent.
pub fn read_grid(bytes: &[u8]) -> Result<Vec<Vec<String>>, GabaritoError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| GabaritoError::Spreadsheet(format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GabaritoError::Spreadsheet("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| GabaritoError::Spreadsheet(format!("sheet '{sheet_name}' not readable: {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Render a grid as line-oriented text, one row per line, non-empty cells
/// joined with spaces. Lets the line classifier run on spreadsheets.
pub fn grid_to_text(grid: &[Vec<String>]) -> String {
    grid.iter()
        .filter_map(|row| {
            let cells: Vec<&str> = row
                .iter()
                .map(|c| c.as_str())
                .filter(|c| !c.is_empty())
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(cells.join(" "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell_to_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.trim().to_string(),
        // Display for f64 renders whole floats without a trailing .0, so
        // question-number cells come out as "1", not "1.0"
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        _ => format!("{cell}").trim().to_string(),
    }
}
