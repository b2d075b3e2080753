//! Tabular import/export of customers and entries.
//!
//! The codec half of this module reads and writes a single sheet as rows of
//! cells. `.xlsx` goes through `calamine` (read) and `rust_xlsxwriter`
//! (write); `.csv` goes through `csv` in both directions. The `customers` and
//! `entries` submodules map those rows onto the store.

pub mod customers;
pub mod entries;

use crate::error::{AppError, AppResult};
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

/// Timestamp pattern used in exported sheets.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// Picks the format of an uploaded file from its name.
    pub fn from_filename(name: &str) -> AppResult<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".xlsx") {
            Ok(SheetFormat::Xlsx)
        } else if lower.ends_with(".csv") {
            Ok(SheetFormat::Csv)
        } else {
            Err(AppError::Validation(
                "Invalid file format. Please send an .xlsx or .csv file.".to_string(),
            ))
        }
    }

    /// Picks the export format from the `format` query parameter.
    pub fn from_query(value: Option<&str>) -> AppResult<Self> {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") => Ok(SheetFormat::Xlsx),
            Some("csv") => Ok(SheetFormat::Csv),
            Some(other) => Err(AppError::Validation(format!(
                "Unknown export format '{}'",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            SheetFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// One exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(i64),
    Empty,
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Empty, Cell::Text)
    }
}

impl Cell {
    fn as_text(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

fn processing<E: std::fmt::Display>(err: E) -> AppError {
    AppError::Processing(err.to_string())
}

fn xlsx_cell(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn read_xlsx(bytes: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(processing)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Processing("the workbook has no sheets".to_string()))?
        .map_err(processing)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(xlsx_cell).collect())
        .collect())
}

fn read_csv(bytes: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(processing)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Reads the first sheet. Cells are trimmed and blank rows are dropped; the
/// header row, if any, is the first element.
pub fn read(format: SheetFormat, bytes: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let rows = match format {
        SheetFormat::Xlsx => read_xlsx(bytes)?,
        SheetFormat::Csv => read_csv(bytes)?,
    };
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.trim().to_string()).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect())
}

fn write_xlsx(sheet_name: &str, header: &[&str], rows: &[Vec<Cell>]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(processing)?;

    for (col, title) in header.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *title, &bold)
            .map_err(processing)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let line = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(line, col, text).map_err(processing)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(line, col, *n as f64).map_err(processing)?;
                }
                Cell::Empty => {}
            }
        }
    }
    workbook.save_to_buffer().map_err(processing)
}

fn write_csv(header: &[&str], rows: &[Vec<Cell>]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(processing)?;
    for row in rows {
        writer
            .write_record(row.iter().map(Cell::as_text))
            .map_err(processing)?;
    }
    writer.into_inner().map_err(processing)
}

/// Serializes a header row followed by `rows`.
pub fn write(format: SheetFormat, sheet_name: &str, header: &[&str], rows: &[Vec<Cell>]) -> AppResult<Vec<u8>> {
    match format {
        SheetFormat::Xlsx => write_xlsx(sheet_name, header, rows),
        SheetFormat::Csv => write_csv(header, rows),
    }
}

/// Cell `idx` of a row, `None` when missing or blank.
pub(crate) fn cell(row: &[String], idx: usize) -> Option<String> {
    row.get(idx).filter(|c| !c.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::Number(1001), "Pedido".into(), Cell::Empty],
            vec![Cell::Number(7), "Orçamento".into(), "Obra centro".into()],
        ]
    }

    #[test]
    fn xlsx_keeps_numbers_as_plain_integers() {
        let bytes = write(SheetFormat::Xlsx, "Painel", &["N°", "Tipo", "Obra"], &sample()).unwrap();
        let rows = read(SheetFormat::Xlsx, &bytes).unwrap();
        assert_eq!(rows[0], vec!["N°", "Tipo", "Obra"]);
        assert_eq!(rows[1][0], "1001");
        assert_eq!(rows[2], vec!["7", "Orçamento", "Obra centro"]);
    }

    #[test]
    fn csv_reader_drops_blank_rows_and_bom() {
        let text = "\u{feff}Nome,Telefone\n , \nAna , 123\n";
        let rows = read(SheetFormat::Csv, text.as_bytes()).unwrap();
        assert_eq!(rows, vec![vec!["Nome", "Telefone"], vec!["Ana", "123"]]);
    }

    #[test]
    fn garbage_xlsx_is_a_processing_error() {
        let err = read(SheetFormat::Xlsx, b"not a zip").unwrap_err();
        assert!(matches!(err, AppError::Processing(_)));
    }

    #[test]
    fn format_selection() {
        assert_eq!(SheetFormat::from_filename("DADOS.XLSX").unwrap(), SheetFormat::Xlsx);
        assert_eq!(SheetFormat::from_filename("dados.csv").unwrap(), SheetFormat::Csv);
        assert!(SheetFormat::from_filename("dados.xls").is_err());
        assert_eq!(SheetFormat::from_query(None).unwrap(), SheetFormat::Xlsx);
        assert!(SheetFormat::from_query(Some("pdf")).is_err());
    }
}
