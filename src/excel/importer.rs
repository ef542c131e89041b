//! Excel importer implementation - Excel (.xlsx) → Workbook

use crate::error::{FillError, FillResult};
use crate::types::{Cell, Row, Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads every worksheet of an .xlsx file into memory
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn import(&self) -> FillResult<Workbook> {
        let mut xlsx: Xlsx<_> = open_workbook(&self.path).map_err(|e| self.open_error(e))?;
        info!(path = %self.path.display(), "opened workbook");

        let mut workbook = Workbook::new();
        for sheet_name in xlsx.sheet_names().to_vec() {
            let values = xlsx
                .worksheet_range(&sheet_name)
                .map_err(|e| self.open_error(e))?;

            // Formula parts are optional; a sheet without any still has values
            let formulas = match xlsx.worksheet_formula(&sheet_name) {
                Ok(range) => Some(range),
                Err(e) => {
                    warn!(sheet = %sheet_name, error = %e, "could not read formulas");
                    None
                }
            };

            let sheet = build_sheet(&sheet_name, &values, formulas.as_ref());
            debug!(sheet = %sheet_name, rows = sheet.rows.len(), "read worksheet");
            workbook.add_sheet(sheet);
        }

        if workbook.sheets.is_empty() {
            return Err(FillError::EmptyWorkbook(self.path.clone()));
        }
        Ok(workbook)
    }

    fn open_error(&self, e: impl std::fmt::Display) -> FillError {
        FillError::Open {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

/// Merge the value and formula ranges into physical rows keyed by absolute position.
///
/// Only cells holding a value or a formula are read, so a row made up
/// solely of styled but empty cells is not a physical row and is never
/// visited by the filler. A formula cell keeps the value stored alongside
/// it as its cached result.
fn build_sheet(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut rows: BTreeMap<u32, BTreeMap<u16, Cell>> = BTreeMap::new();

    if let Some((row0, col0)) = values.start() {
        for (r, c, data) in values.used_cells() {
            if let Some((row, col)) = absolute(row0, col0, r, c) {
                rows.entry(row).or_default().insert(col, convert_cell(data));
            }
        }
    }

    if let Some(formulas) = formulas {
        if let Some((row0, col0)) = formulas.start() {
            for (r, c, formula) in formulas.used_cells() {
                if let Some((row, col)) = absolute(row0, col0, r, c) {
                    let source = formula.strip_prefix('=').unwrap_or(formula);
                    let cells = rows.entry(row).or_default();
                    let cached = cells.remove(&col).and_then(cached_result);
                    cells.insert(
                        col,
                        Cell::Formula {
                            source: source.to_string(),
                            cached,
                        },
                    );
                }
            }
        }
    }

    let mut sheet = Sheet::new(name);
    for (index, cells) in rows {
        sheet.add_row(Row { index, cells });
    }
    sheet
}

fn absolute(row0: u32, col0: u32, r: usize, c: usize) -> Option<(u32, u16)> {
    let row = row0.checked_add(u32::try_from(r).ok()?)?;
    let col = col0.checked_add(u32::try_from(c).ok()?)?;
    match u16::try_from(col) {
        Ok(col) => Some((row, col)),
        Err(_) => {
            warn!(row, col, "skipping cell beyond the last supported column");
            None
        }
    }
}

/// Map a calamine value onto the cell model
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Blank,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Boolean(*b),
        Data::DateTime(dt) if dt.is_duration() => Cell::Duration(dt.as_f64()),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::Error(e) => Cell::Text(e.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

/// The value a formula cell last evaluated to, in the text form the writer stores
fn cached_result(value: Cell) -> Option<String> {
    match value {
        Cell::Blank => None,
        Cell::Text(s) => Some(s),
        Cell::Number(n) | Cell::DateTime(n) | Cell::Duration(n) => Some(n.to_string()),
        Cell::Boolean(b) => Some(if b { "TRUE" } else { "FALSE" }.to_string()),
        Cell::Formula { cached, .. } => cached,
    }
}
