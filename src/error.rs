use crate::query::Query;
use thiserror::Error;

/// Errors that can occur during geocoding operations
///
/// The first four variants form the taxonomy shared by every provider; the
/// remaining ones carry transport and configuration failures unchanged.
#[derive(Error, Debug)]
pub enum GeocodingError {
    /// The service returned no usable result, an empty payload, or a payload
    /// that could not be parsed.
    #[error("{0}")]
    NoResult(String),
    /// The input shape or the operation is not supported by the provider.
    /// Raised before any network call.
    #[error("{0}")]
    UnsupportedOperation(String),
    /// The service refused the request because a usage limit was reached.
    #[error("{0}")]
    QuotaExceeded(String),
    /// The service rejected the API key, or denied the request outright.
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("HTTP request error")]
    Request(#[from] reqwest::Error),
    /// A transport failure reported by a custom adapter
    #[error("Adapter error: {0}")]
    Adapter(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GeocodingError {
    pub(crate) fn no_result(query: &Query) -> Self {
        GeocodingError::NoResult(format!("Could not execute query \"{}\".", query))
    }

    pub(crate) fn quota_exceeded(query: &Query) -> Self {
        GeocodingError::QuotaExceeded(format!("Daily quota exceeded {}", query))
    }

    pub(crate) fn invalid_credentials(query: &Query) -> Self {
        GeocodingError::InvalidCredentials(format!("API key is invalid {}", query))
    }
}
