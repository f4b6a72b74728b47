//! Error types for the Datadis to InfluxDB2 exporter.
//!
//! Every stage of a run reports failures through one of the typed errors below.
//! Nothing above the transport retries; the top-level [`Error`] names the stage
//! that failed and `main` decides how to terminate.

use crate::datadis::Endpoint;
use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type, tagged by the stage of the run that failed.
#[derive(Error, Debug)]
pub enum Error {
    /// Login or data acquisition from Datadis failed
    #[error("Datadis acquisition failed")]
    Provider(#[from] ProviderError),

    /// A provider record could not be turned into a line
    #[error("record transformation failed")]
    Transform(#[from] TransformError),

    /// The batch could not be written to InfluxDB
    #[error("InfluxDB upload failed")]
    Storage(#[from] StorageError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required configuration value is missing or blank
    #[error("missing required configuration: {0}")]
    Missing(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised by the retrying HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request body is a stream and cannot be replayed on retry
    #[error("request body cannot be buffered for retries")]
    UnbufferedBody,

    /// HTTP request failed before producing a response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Datadis communication and payload errors.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The transport gave up on the request
    #[error("{endpoint} request failed")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: TransportError,
    },

    /// Datadis answered with a status other than 200
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// Response body was not the expected JSON document
    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: Endpoint, message: String },

    /// The configured distributor reported an error inside a 200 response
    #[error("distributor {distributor} reported an error for {endpoint}: {code} {description}")]
    Distributor {
        endpoint: Endpoint,
        distributor: String,
        code: String,
        description: String,
    },

    /// A list that must hold at least one entry came back empty
    #[error("{endpoint} response contained no entries")]
    EmptyList { endpoint: Endpoint },
}

/// Record transformation errors.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Failed to parse date/time
    #[error("failed to parse date/time from '{text}': {message}")]
    DateTimeParse { text: String, message: String },
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Nothing was produced upstream
    #[error("no data to send")]
    EmptyBatch,

    /// Gzip compression of the batch failed
    #[error("failed to compress payload: {0}")]
    Compress(#[from] std::io::Error),

    /// The transport gave up on the write request
    #[error("InfluxDB write request failed")]
    Transport(#[from] TransportError),

    /// InfluxDB answered with a status other than 204
    #[error("InfluxDB rejected write (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

impl ConfigError {
    /// Creates a new missing configuration error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ProviderError {
    /// Wraps a transport failure for the given endpoint.
    pub fn transport(endpoint: Endpoint, err: impl Into<TransportError>) -> Self {
        Self::Transport {
            endpoint,
            source: err.into(),
        }
    }

    /// Creates a decode error from a serde failure.
    pub fn decode(endpoint: Endpoint, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint,
            message: err.to_string(),
        }
    }
}

impl TransformError {
    /// Creates a datetime parse error.
    pub fn datetime_parse(text: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::DateTimeParse {
            text: text.into(),
            message: err.to_string(),
        }
    }
}

impl StorageError {
    /// Creates a rejected write error from HTTP status and response body.
    pub fn rejected(status: reqwest::StatusCode, body: String) -> Self {
        Self::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}
