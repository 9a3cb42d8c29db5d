use reqwest::StatusCode;
use thiserror::Error;

/// Failure while fetching or decoding a vacancy page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("response from {url} is not a vacancy list: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected page-number entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("page number {0:?} is not a number")]
    NotANumber(String),
    #[error("page number {0} is below 1")]
    BelowMinimum(i64),
    #[error("page number {0:?} is too large")]
    TooLarge(String),
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Input(#[from] InputError),
}
