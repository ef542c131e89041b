use std::path::PathBuf;
use thiserror::Error;

pub type FillResult<T> = Result<T, FillError>;

#[derive(Error, Debug)]
pub enum FillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to open workbook {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("Failed to write workbook: {0}")]
    Write(String),

    #[error("Workbook has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
