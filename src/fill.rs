//! Row filling: backfill blank city/address cells on a sheet
//!
//! One iteration over the rows, parameterized by a [`FillPolicy`]:
//! - `CrossFill` copies whichever of the two fields is present into the blank one
//! - `FixedFallback` fills a blank city (and a blank address, when both are blank)
//!   with a constant

use crate::types::{is_empty_slot, Cell, Sheet};
use std::fmt;
use tracing::debug;

/// Default zero-based column holding the city
pub const DEFAULT_CITY_COLUMN: u16 = 1;
/// Default zero-based column holding the address
pub const DEFAULT_ADDRESS_COLUMN: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillPolicy {
    CrossFill,
    FixedFallback(String),
}

/// The two columns the filler reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillColumns {
    pub city: u16,
    pub address: u16,
}

impl Default for FillColumns {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY_COLUMN,
            address: DEFAULT_ADDRESS_COLUMN,
        }
    }
}

/// What was set on a modified row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillChange {
    City(String),
    Address(String),
    CityAndAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    pub row: u32,
    pub change: FillChange,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            FillChange::City(v) => write!(f, "Modified row {}: Set city to {}", self.row, v),
            FillChange::Address(v) => {
                write!(f, "Modified row {}: Set address to {}", self.row, v)
            }
            FillChange::CityAndAddress(v) => write!(
                f,
                "Modified row {}: Set city and address to {}",
                self.row, v
            ),
        }
    }
}

/// Ordered log of the rows a fill pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub modifications: Vec<Modification>,
}

impl FillReport {
    pub fn count(&self) -> usize {
        self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    /// Log lines in row order
    pub fn lines(&self) -> Vec<String> {
        self.modifications.iter().map(|m| m.to_string()).collect()
    }
}

/// Apply `policy` to every row of `sheet` in place.
pub fn fill_sheet(sheet: &mut Sheet, policy: &FillPolicy, columns: FillColumns) -> FillReport {
    let mut report = FillReport::default();

    for row in &mut sheet.rows {
        let city_empty = is_empty_slot(row.cell(columns.city));
        let address_empty = is_empty_slot(row.cell(columns.address));

        let change = match policy {
            FillPolicy::CrossFill => {
                if city_empty && !address_empty {
                    let value = row
                        .cell(columns.address)
                        .map(Cell::to_text)
                        .unwrap_or_default();
                    row.set_cell(columns.city, Cell::Text(value.clone()));
                    Some(FillChange::City(value))
                } else if address_empty && !city_empty {
                    let value = row
                        .cell(columns.city)
                        .map(Cell::to_text)
                        .unwrap_or_default();
                    row.set_cell(columns.address, Cell::Text(value.clone()));
                    Some(FillChange::Address(value))
                } else {
                    None
                }
            }
            FillPolicy::FixedFallback(text) => {
                if city_empty && address_empty {
                    row.set_cell(columns.city, Cell::Text(text.clone()));
                    row.set_cell(columns.address, Cell::Text(text.clone()));
                    Some(FillChange::CityAndAddress(text.clone()))
                } else if city_empty {
                    row.set_cell(columns.city, Cell::Text(text.clone()));
                    Some(FillChange::City(text.clone()))
                } else {
                    None
                }
            }
        };

        match change {
            Some(change) => {
                let modification = Modification {
                    row: row.index,
                    change,
                };
                debug!(%modification, "row filled");
                report.modifications.push(modification);
            }
            None => debug!(row = row.index, city_empty, address_empty, "row unchanged"),
        }
    }

    report
}
