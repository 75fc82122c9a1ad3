use thiserror::Error;

/// Failure kinds of a round-trip to the computation service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("network failure: {0}")]
    Transport(String),
    #[error("server returned status {status}")]
    Server { status: u16 },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum FileError {
    #[error("No file selected")]
    NoFileSelected,
    #[error("No result to export")]
    NoResult,
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not valid UTF-8")]
    Encoding(String),
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type SubmitResult<T> = Result<T, SubmitError>;
pub type FileResult<T> = Result<T, FileError>;
