// Error type shared by the library modules. The binary wraps these in
// `anyhow` for display.

use thiserror::Error;

/// Errors returned by the Toast client.
#[derive(Debug, Error)]
pub enum ToastError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the token file failed.
    #[error("token file error: {0}")]
    Io(#[from] std::io::Error),

    /// The auth response decoded but carried no `access_token` string.
    #[error("authentication response has no access_token")]
    MissingAccessToken,

    /// A date-time string matched none of the accepted formats.
    #[error("could not parse date: {0:?}")]
    InvalidDate(String),

    /// A token or restaurant GUID cannot be sent as a header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// A required environment variable is unset or empty.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, ToastError>;
