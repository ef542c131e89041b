//! Run configuration
//!
//! A [`FillConfig`] is built either from CLI flags or from a YAML file:
//!
//! ```yaml
//! input: customers.xlsx
//! output: customers_filled.xlsx
//! variant: fallback
//! fallback_text: Ramallah
//! city_column: B
//! address_column: 5
//! ```

use crate::error::{FillError, FillResult};
use crate::fill::{FillColumns, FillPolicy, DEFAULT_ADDRESS_COLUMN, DEFAULT_CITY_COLUMN};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback place name used when none is configured
pub const DEFAULT_FALLBACK_TEXT: &str = "رام الله";

/// Highest zero-based column index an xlsx sheet can hold (XFD)
const MAX_COLUMN: u16 = 16_383;

/// Which fill rule to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    CrossFill,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub fallback_text: String,
    pub variant: Variant,
    pub columns: FillColumns,
}

/// A column given either as a zero-based index or as a letter (`B`, `AA`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ColumnRef {
    Index(u16),
    Letter(String),
}

impl ColumnRef {
    fn resolve(&self) -> FillResult<u16> {
        match self {
            ColumnRef::Index(i) => check_column(*i as u32, &i.to_string()),
            ColumnRef::Letter(s) => parse_column(s),
        }
    }
}

/// On-disk shape of a config file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input: PathBuf,
    output: PathBuf,
    variant: Variant,
    fallback_text: Option<String>,
    city_column: Option<ColumnRef>,
    address_column: Option<ColumnRef>,
}

impl FillConfig {
    pub fn new(input_path: PathBuf, output_path: PathBuf, variant: Variant) -> Self {
        Self {
            input_path,
            output_path,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            variant,
            columns: FillColumns::default(),
        }
    }

    pub fn with_fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = text.into();
        self
    }

    pub fn with_columns(mut self, columns: FillColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Load a YAML config file. Relative paths inside it resolve against
    /// the file's own directory.
    pub fn from_yaml_file(path: &Path) -> FillResult<Self> {
        let content = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&content, base)
    }

    pub fn from_yaml_str(content: &str, base_dir: &Path) -> FillResult<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;

        let columns = FillColumns {
            city: match &file.city_column {
                Some(c) => c.resolve()?,
                None => DEFAULT_CITY_COLUMN,
            },
            address: match &file.address_column {
                Some(c) => c.resolve()?,
                None => DEFAULT_ADDRESS_COLUMN,
            },
        };

        let mut config = FillConfig::new(
            base_dir.join(file.input),
            base_dir.join(file.output),
            file.variant,
        )
        .with_columns(columns);
        if let Some(text) = file.fallback_text {
            config.fallback_text = text;
        }
        Ok(config)
    }

    pub fn policy(&self) -> FillPolicy {
        match self.variant {
            Variant::CrossFill => FillPolicy::CrossFill,
            Variant::Fallback => FillPolicy::FixedFallback(self.fallback_text.clone()),
        }
    }

    /// Reject configurations that would overwrite the input or fill
    /// a column from itself.
    pub fn validate(&self) -> FillResult<()> {
        if same_path(&self.input_path, &self.output_path) {
            return Err(FillError::Config(format!(
                "output path must differ from input path: {}",
                self.output_path.display()
            )));
        }
        if self.columns.city == self.columns.address {
            return Err(FillError::Config(format!(
                "city and address columns must differ (both are {})",
                self.columns.city
            )));
        }
        if self.variant == Variant::Fallback && self.fallback_text.is_empty() {
            return Err(FillError::Config(
                "fallback text must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn check_column(index: u32, spec: &str) -> FillResult<u16> {
    if index > MAX_COLUMN as u32 {
        return Err(FillError::Config(format!(
            "column '{}' is beyond the last xlsx column (XFD)",
            spec
        )));
    }
    Ok(index as u16)
}

/// Parse a column given as a zero-based index (`5`) or letters (`F`).
pub fn parse_column(spec: &str) -> FillResult<u16> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(FillError::Config("empty column".to_string()));
    }

    if let Ok(index) = spec.parse::<u32>() {
        return check_column(index, spec);
    }

    let mut value: u32 = 0;
    for c in spec.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(FillError::Config(format!(
                "invalid column '{}': expected an index or letters",
                spec
            )));
        }
        value = value * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if value > MAX_COLUMN as u32 + 1 {
            return check_column(value, spec);
        }
    }
    check_column(value - 1, spec)
}
