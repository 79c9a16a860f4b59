//! Error types used by the crate.

use thiserror::Error;

use crate::marker::MarkerId;

/// Failure of a single load request.
///
/// Any of these aborts the load cycle it happened in. Problems with individual records never
/// produce a `FetchError`, they are counted by the renderer instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not produce a response (connection refused, DNS failure, etc).
    #[error("{resource} request failed: {message}")]
    Transport {
        /// Name of the requested resource, e.g. `ships`.
        resource: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("{resource} HTTP error! status: {status}")]
    Status {
        /// Name of the requested resource.
        resource: String,
        /// HTTP status code.
        status: u16,
    },
    /// The response body is not valid JSON.
    #[error("{resource} response is not valid JSON: {message}")]
    Decode {
        /// Name of the requested resource.
        resource: String,
        /// Decoder message.
        message: String,
    },
    /// The response is valid JSON but not a list of records.
    #[error("{resource} response is not a list of records (got {found})")]
    UnexpectedShape {
        /// Name of the requested resource.
        resource: String,
        /// JSON type that was received instead.
        found: &'static str,
    },
}

/// Error reported by a [`MapSurface`](crate::MapSurface) implementation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SurfaceError {
    /// The surface does not know the marker.
    #[error("marker {0} is not on the map")]
    UnknownMarker(MarkerId),
    /// The surface refused to place the marker.
    #[error("marker rejected: {0}")]
    Rejected(String),
}
