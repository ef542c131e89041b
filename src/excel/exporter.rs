//! Excel exporter implementation - Workbook → Excel (.xlsx)

use crate::error::{FillError, FillResult};
use crate::types::{Cell, Sheet, Workbook};
use rust_xlsxwriter::{Format, Formula, Workbook as XlsxWorkbook, Worksheet};
use std::fs;
use std::path::Path;
use tracing::info;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Writes a [`Workbook`] to disk, all sheets in order
pub struct ExcelExporter<'a> {
    workbook: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    /// Export to `output_path`.
    ///
    /// The file is first written to a temporary file next to the destination
    /// and renamed over it only once complete, so a failed run never leaves a
    /// truncated workbook behind.
    ///
    /// A replaced output file keeps its permissions; a new one gets the
    /// same mode as any file created under the current umask.
    pub fn export(&self, output_path: &Path) -> FillResult<()> {
        let mut book = self.build()?;

        let dir = match output_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".rowfill-").suffix(".xlsx");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Subject to the umask, like a plain File::create
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder.tempfile_in(dir)?;

        book.save_to_writer(tmp.as_file_mut())
            .map_err(|e| FillError::Write(format!("Failed to save Excel file: {}", e)))?;

        if let Ok(existing) = fs::metadata(output_path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        tmp.persist(output_path).map_err(|e| FillError::Io(e.error))?;

        info!(path = %output_path.display(), "saved workbook");
        Ok(())
    }

    fn build(&self) -> FillResult<XlsxWorkbook> {
        let mut book = XlsxWorkbook::new();
        for sheet in &self.workbook.sheets {
            let worksheet = book.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(|e| {
                FillError::Write(format!("Failed to set worksheet name '{}': {}", sheet.name, e))
            })?;
            write_sheet(worksheet, sheet)?;
        }
        Ok(book)
    }
}

/// Number formats for cells whose type lives in their style
struct Formats {
    date: Format,
    datetime: Format,
    duration: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
            duration: Format::new().set_num_format(DURATION_FORMAT),
        }
    }

    fn for_datetime(&self, serial: f64) -> &Format {
        if serial.fract() == 0.0 {
            &self.date
        } else {
            &self.datetime
        }
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> FillResult<()> {
    let formats = Formats::new();
    for row in &sheet.rows {
        for (&col, cell) in &row.cells {
            write_cell(worksheet, &formats, row.index, col, cell)?;
        }
    }
    Ok(())
}

/// Write a single cell according to its tag
fn write_cell(
    worksheet: &mut Worksheet,
    formats: &Formats,
    row: u32,
    col: u16,
    cell: &Cell,
) -> FillResult<()> {
    let result = match cell {
        Cell::Text(s) => worksheet.write_string(row, col, s),
        Cell::Number(n) => worksheet.write_number(row, col, *n),
        Cell::Boolean(b) => worksheet.write_boolean(row, col, *b),
        Cell::DateTime(n) => {
            worksheet.write_number_with_format(row, col, *n, formats.for_datetime(*n))
        }
        Cell::Duration(n) => worksheet.write_number_with_format(row, col, *n, &formats.duration),
        Cell::Formula { source, cached } => {
            let mut formula = Formula::new(source.as_str());
            if let Some(value) = cached {
                formula = formula.set_result(value.as_str());
            }
            worksheet.write_formula(row, col, formula)
        }
        // Unformatted blanks carry nothing worth storing
        Cell::Blank => return Ok(()),
    };
    result
        .map(|_| ())
        .map_err(|e| FillError::Write(format!("Failed to write cell ({}, {}): {}", row, col, e)))
}
