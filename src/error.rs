use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every failure the pipeline can report. All of them abort the run.
#[derive(Error, Debug)]
pub enum StripError {
    #[error("no rows selected: {0}")]
    MissingSelection(String),

    #[error("no columns matched s1 pattern '{s1}' or s2 pattern '{s2}'")]
    NoColumnsMatched { s1: String, s2: String },

    #[error("malformed matrix: {0}")]
    DataFormat(String),

    #[error("row label '{0}' not found in matrix")]
    RowNotFound(String),

    #[error("invalid column pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("annotation column '{0}' not found in matrix")]
    MissingColumn(String),

    #[error("invalid delimiter '{0}': expected a single ASCII character or \\t")]
    InvalidDelimiter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering failed: {0}")]
    Render(String),
}

impl From<csv::Error> for StripError {
    fn from(e: csv::Error) -> Self {
        StripError::DataFormat(e.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StripError>;
