//! Excel workbook I/O
//!
//! - Import: .xlsx → [`Workbook`](crate::types::Workbook) (values and formula text)
//! - Export: [`Workbook`](crate::types::Workbook) → .xlsx, written atomically

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
