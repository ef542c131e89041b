//! rowfill - backfill blank city/address cells in an Excel workbook
//!
//! The first worksheet is scanned row by row and one of two fill policies is
//! applied to the city and address columns:
//!
//! - **cross-fill**: a blank city takes the address, a blank address takes the city
//! - **fallback**: a blank city (and a blank address, if both are blank) takes a
//!   fixed place name
//!
//! The result is written to a separate output file.
//!
//! # Example
//!
//! ```no_run
//! use rowfill::config::{FillConfig, Variant};
//! use rowfill::cli::process;
//!
//! let config = FillConfig::new("in.xlsx".into(), "out.xlsx".into(), Variant::CrossFill);
//! let report = process(&config, false)?;
//!
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! # Ok::<(), rowfill::error::FillError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod fill;
pub mod types;

// Re-export commonly used types
pub use error::{FillError, FillResult};
pub use fill::{fill_sheet, FillColumns, FillPolicy, FillReport, Modification};
pub use types::{Cell, Row, Sheet, Workbook};
