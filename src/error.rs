use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read schema file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset has no column named '{0}'")]
    MissingColumn(SmolStr),
    #[error("column '{column}' is not a side effect indicator: {reason}")]
    SchemaMismatch { column: SmolStr, reason: String },
    #[error("no record has {field} '{value}'")]
    InvalidFilterValue { field: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
