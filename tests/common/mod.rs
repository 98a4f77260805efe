//! Spreadsheet fixtures shared by the integration tests

#![allow(dead_code)]

use std::path::Path;

use poam_jira_import::POAM_COLUMNS;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

/// A cell written into a fixture workbook
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Date(u16, u8, u8),
}

/// The spreadsheet column index of a POAM column
pub fn column(name: &str) -> u16 {
    POAM_COLUMNS
        .iter()
        .position(|column| *column == name)
        .unwrap_or_else(|| panic!("unknown column {name}")) as u16
}

/// Writes a single worksheet workbook, one spreadsheet row per entry
pub fn write_workbook(path: &Path, rows: &[Vec<(&str, Cell)>]) {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row, cells) in rows.iter().enumerate() {
        let row = row as u32;
        for (name, cell) in cells {
            let col = column(name);
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, *text).unwrap();
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, *number).unwrap();
                }
                Cell::Date(year, month, day) => {
                    let date = ExcelDateTime::from_ymd(*year, *month, *day).unwrap();
                    worksheet.write_datetime_with_format(row, col, &date, &date_format).unwrap();
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Reads a written import file back, header first
pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();

    reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_owned).collect())
        .collect()
}
