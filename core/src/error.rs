//! Error type for the movie API client.
//!
//! # Design
//! Every failed operation produces exactly one `ClientError`. Its `Display`
//! output is the human-readable message alone; callers that need to branch
//! use `kind()` and `status()` instead of matching on text. The low-level
//! cause, when there is one, is reachable through `Error::source`.

use thiserror::Error;
use ureq::http::StatusCode;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What went wrong during a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-2xx status.
    Status,
    /// The connection was refused, reset or closed early, or the response
    /// bytes were not valid HTTP.
    Transport,
    /// No response arrived within the configured window.
    Timeout,
    /// A 2xx body did not match the expected shape.
    Decode,
    /// The outbound payload could not be serialized.
    Encode,
}

/// The single error surfaced by every `MovieServiceClient` operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    body: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl ClientError {
    /// Build the error for a non-2xx response.
    ///
    /// The message is the canonical reason phrase of the status code. The
    /// body text stands in only for codes without one. Either way the body
    /// stays available through `body()`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason());
        let message = match reason {
            Some(reason) => reason.to_string(),
            None if !body.trim().is_empty() => body.to_string(),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ErrorKind::Status,
            message,
            status: Some(status),
            body: Some(body.to_string()).filter(|b| !b.is_empty()),
            source: None,
        }
    }

    pub fn transport(cause: impl Into<BoxError>) -> Self {
        Self::with_cause(ErrorKind::Transport, cause.into())
    }

    pub fn timeout(cause: impl Into<BoxError>) -> Self {
        Self::with_cause(ErrorKind::Timeout, cause.into())
    }

    pub(crate) fn decode(cause: serde_json::Error) -> Self {
        Self::with_cause(ErrorKind::Decode, Box::new(cause))
    }

    pub(crate) fn encode(cause: serde_json::Error) -> Self {
        Self::with_cause(ErrorKind::Encode, Box::new(cause))
    }

    fn with_cause(kind: ErrorKind, cause: BoxError) -> Self {
        Self {
            kind,
            message: cause.to_string(),
            status: None,
            body: None,
            source: Some(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, present only for `ErrorKind::Status`.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Response body of a status error, when the server sent one.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}
