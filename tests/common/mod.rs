//! Shared fixtures: build small .xlsx files on the fly and read them back

#![allow(dead_code)]

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Formula, Workbook};
use std::path::Path;

/// Value written into a fixture cell
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Formula(&'a str),
    /// Formula with a stored result
    Computed(&'a str, &'a str),
    /// Serial date shown as yyyy-mm-dd
    Date(f64),
}

/// Write a single-sheet workbook. Each entry is (row, col, value).
pub fn write_fixture(path: &Path, cells: &[(u32, u16, Value)]) {
    write_fixture_sheets(path, &[("Sheet1", cells)]);
}

pub fn write_fixture_sheets(path: &Path, sheets: &[(&str, &[(u32, u16, Value)])]) {
    let mut workbook = Workbook::new();
    for (name, cells) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (row, col, value) in cells.iter() {
            match value {
                Value::Text(s) => worksheet.write_string(*row, *col, *s).unwrap(),
                Value::Number(n) => worksheet.write_number(*row, *col, *n).unwrap(),
                Value::Bool(b) => worksheet.write_boolean(*row, *col, *b).unwrap(),
                Value::Formula(f) => worksheet.write_formula(*row, *col, Formula::new(*f)).unwrap(),
                Value::Computed(f, result) => worksheet
                    .write_formula(*row, *col, Formula::new(*f).set_result(*result))
                    .unwrap(),
                Value::Date(serial) => {
                    let format = Format::new().set_num_format("yyyy-mm-dd");
                    worksheet
                        .write_number_with_format(*row, *col, *serial, &format)
                        .unwrap()
                }
            };
        }
    }
    workbook.save(path).unwrap();
}

/// The customer sheet used across tests: header, then city (B) / address (F) pairs.
///
/// | row | city      | address   |
/// |-----|-----------|-----------|
/// | 0   | city      | address   |
/// | 1   | Jenin     | Jenin     |
/// | 2   | Hebron    |           |
/// | 3   |           | Nablus    |
/// | 4   |           | 5 (num)   |
/// | 7   |           |           | (id only)
pub fn write_customers(path: &Path) {
    write_fixture(
        path,
        &[
            (0, 0, Value::Text("id")),
            (0, 1, Value::Text("city")),
            (0, 5, Value::Text("address")),
            (1, 0, Value::Number(1.0)),
            (1, 1, Value::Text("Jenin")),
            (1, 5, Value::Text("Jenin")),
            (2, 0, Value::Number(2.0)),
            (2, 1, Value::Text("Hebron")),
            (3, 0, Value::Number(3.0)),
            (3, 5, Value::Text("Nablus")),
            (4, 0, Value::Number(4.0)),
            (4, 5, Value::Number(5.0)),
            (7, 0, Value::Number(7.0)),
        ],
    );
}

/// Formula text of the first sheet at an absolute position
pub fn read_formula(path: &Path, row: u32, col: u32) -> String {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let name = workbook.sheet_names()[0].clone();
    let range = workbook.worksheet_formula(&name).unwrap();
    range.get_value((row, col)).cloned().unwrap_or_default()
}

/// Cell value of the first sheet at an absolute position
pub fn read_cell(path: &Path, row: u32, col: u32) -> Data {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

pub fn text(s: &str) -> Data {
    Data::String(s.to_string())
}
