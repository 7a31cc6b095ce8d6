//! Blocking API client core for the movie service.
//!
//! # Overview
//! Every operation is one HTTP round-trip: a `build_*` method produces an
//! `HttpRequest`, a `Transport` executes it, and a `parse_*` method turns the
//! `HttpResponse` into a typed result. Any failure along the way surfaces as a
//! single `ClientError`.
//!
//! # Design
//! - `MovieServiceClient` holds only the base URL and its transport; calls
//!   share nothing mutable and may run concurrently.
//! - `build_*` / `parse_*` never touch the network, so request shapes and
//!   error normalization are tested without a server.
//! - `UreqTransport` is the default transport. Anything implementing
//!   `Transport` can replace it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod routes;
pub mod transport;
pub mod types;

pub use client::{MovieServiceClient, DELETE_SUCCESS_MESSAGE};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::MovieRecord;
