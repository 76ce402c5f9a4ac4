use thiserror::Error;

/// Errors raised while turning a source file into a [`LaunchDataset`](super::model::LaunchDataset).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("'class' must be 0 or 1, got {0}")]
    InvalidOutcome(i64),

    #[error("'class' must be 0 or 1, got {0}")]
    NonIntegralOutcome(f64),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: &'static str, data_type: String },
}
