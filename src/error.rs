use thiserror::Error;

/// Fatal conditions of the last-date filter. Any of these aborts the whole run;
/// no partial document is produced.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Malformed date for {instrument} at index {index}: {value}")]
    MalformedDate {
        instrument: String,
        index: String,
        value: String,
    },

    #[error("Index {index} of {instrument} is missing from field '{field}'")]
    MissingIndexInField {
        instrument: String,
        field: String,
        index: String,
    },

    #[error("Series field '{field}' is missing for {instrument}")]
    MissingSeriesField { instrument: String, field: String },

    #[error("Series field '{field}' of {instrument} is not an object")]
    MalformedSeries { instrument: String, field: String },

    #[error("Attribute '{attribute}' is missing for {instrument}")]
    MissingAttribute {
        instrument: String,
        attribute: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FilterResult<T> = std::result::Result<T, FilterError>;
