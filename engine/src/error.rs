use thiserror::Error;

/// Failures at the edge of the pipeline. Parsing and aggregation never fail;
/// only reading inputs, loading settings and writing outputs do.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV output error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}
