use std::collections::BTreeMap;

//==============================================================================
// Cells
//==============================================================================

/// A single cell value, tagged by the type it was stored as.
///
/// An absent cell (no entry at that column) is represented by
/// `Row::cell` returning `None`, not by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Date/time stored as an Excel serial number
    DateTime(f64),
    /// Elapsed time stored as a fraction of days
    Duration(f64),
    Formula {
        /// Source text, without the leading `=`
        source: String,
        /// Last calculated value as stored in the file
        cached: Option<String>,
    },
    Blank,
}

impl Cell {
    /// A formula with no stored result
    pub fn formula(source: impl Into<String>) -> Self {
        Cell::Formula {
            source: source.into(),
            cached: None,
        }
    }

    /// Only blank cells carry no value; an empty string is still a string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    /// Render the cell as the text that would be copied into another cell.
    ///
    /// Formulas render as their source, not their evaluated result.
    /// Dates and durations render as their serial number.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) | Cell::DateTime(n) | Cell::Duration(n) => format_number(*n),
            Cell::Boolean(b) => b.to_string(),
            Cell::Formula { source, .. } => source.clone(),
            Cell::Blank => String::new(),
        }
    }
}

/// Integral values print without a fractional part (`5.0` → `"5"`);
/// everything else uses the shortest round-trip representation.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// True when the slot is absent or holds an empty cell.
pub fn is_empty_slot(cell: Option<&Cell>) -> bool {
    cell.map_or(true, Cell::is_empty)
}

//==============================================================================
// Rows, sheets, workbooks
//==============================================================================

/// A physical row: its zero-based index in the sheet and its non-absent cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub index: u32,
    pub cells: BTreeMap<u16, Cell>,
}

impl Row {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
        }
    }

    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(&col)
    }

    pub fn set_cell(&mut self, col: u16, cell: Cell) {
        self.cells.insert(col, cell);
    }

    /// Builder-style helper used when assembling rows by hand.
    pub fn with_cell(mut self, col: u16, cell: Cell) -> Self {
        self.set_cell(col, cell);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    /// Rows in file order
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.iter().find(|r| r.index == index)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn first_sheet_mut(&mut self) -> Option<&mut Sheet> {
        self.sheets.first_mut()
    }
}
