use std::path::PathBuf;

use thiserror::Error;

/// Failures while retrieving the dataset from its source.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset '{}': {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failures while parsing delimited text into rows.
///
/// Malformed data rows are not errors; they degrade to empty-string fields.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("dataset has no header row")]
    MissingHeader,
}

/// A raw field value could not be read as a number.
#[derive(Debug, Error)]
#[error("cannot coerce '{raw}' to a number")]
pub struct CoerceError {
    pub raw: String,
}

/// Failures while computing a summary statistic.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("aggregation requested over an empty record set")]
    EmptyInput,
}
