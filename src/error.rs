use thiserror::Error;

/// Failures surfaced by the library.
///
/// Missing data is never an error: lookups over a facts document return
/// `Option`/empty collections instead. Only transport problems on required
/// fetches and internally inconsistent requests propagate.
#[derive(Debug, Error)]
pub enum FilinglensError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("transport failure: status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, FilinglensError>;
