use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExploreError {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured city file does not exist.
    #[error("Data file not found: {}", .0.display())]
    MissingFile(std::path::PathBuf),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    /// The filtered table has no rows, so mode/min/max are undefined.
    #[error("No trips match the selected filters")]
    NoData,

    /// End of input reached while a filter prompt still needed an answer.
    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),
}

pub type Result<T> = std::result::Result<T, ExploreError>;
