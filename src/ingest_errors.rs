use thiserror::Error;

/// Row-level failures raised while mapping a PSV row to a [`Measurement`](crate::measurement::Measurement).
///
/// Variants
/// -----------------
/// * `MissingColumn` – A required column is absent from the table header.
/// * `MaskedValue` – A required cell is empty.
/// * `InvalidTimestamp` – `obsTime` is not an ISO-8601 UTC timestamp; payload carries the raw text.
/// * `InvalidFloat` – A numeric cell cannot be cast to `f64`.
/// * `Malformed` – The row itself could not be read (e.g. wrong field count).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRowError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Missing value in required column: {0}")]
    MaskedValue(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Invalid numeric value in column {column}: {value:?}")]
    InvalidFloat { column: String, value: String },
    #[error("Malformed row: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{message}")]
    InvalidFileFormat {
        message: String,
        #[source]
        cause: Option<ParseRowError>,
    },

    #[error("Unable to read data product {name}: {source}")]
    Storage {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid processor configuration: {0}")]
    InvalidConfig(String),
}

impl IngestError {
    /// Build an `InvalidFileFormat` error with no underlying cause.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        IngestError::InvalidFileFormat {
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap a row-level failure; `row` is 1-based, counted over data rows.
    pub fn invalid_row(row: usize, cause: ParseRowError) -> Self {
        IngestError::InvalidFileFormat {
            message: format!("Invalid file format at row {row}: {cause}"),
            cause: Some(cause),
        }
    }

    pub fn storage(name: impl Into<String>, source: std::io::Error) -> Self {
        IngestError::Storage {
            name: name.into(),
            source,
        }
    }

    pub fn is_invalid_file_format(&self) -> bool {
        matches!(self, IngestError::InvalidFileFormat { .. })
    }
}

impl PartialEq for IngestError {
    fn eq(&self, other: &Self) -> bool {
        use IngestError::*;
        match (self, other) {
            (
                InvalidFileFormat {
                    message: a,
                    cause: ca,
                },
                InvalidFileFormat {
                    message: b,
                    cause: cb,
                },
            ) => a == b && ca == cb,

            // io::Error is not comparable: same variant and same resource
            (Storage { name: a, .. }, Storage { name: b, .. }) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,

            _ => false,
        }
    }
}
