//! Blocking client for the movie API.
//!
//! # Design
//! `MovieServiceClient` holds the base URL and a transport and nothing else.
//! Each public operation is `build_*` → one `Transport::execute` → `parse_*`,
//! and returns only once that single exchange has finished. The `build_*` and
//! `parse_*` halves are public and I/O free, so callers can drive the
//! exchange through their own HTTP stack.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::routes::{self, MOVIES_V1, MOVIE_BY_ID_V1, MOVIE_BY_NAME_V1, MOVIE_BY_YEAR_V1};
use crate::transport::{Transport, UreqTransport};
use crate::types::MovieRecord;

/// Returned by `delete_by_name` on any 2xx response; the server body is ignored.
pub const DELETE_SUCCESS_MESSAGE: &str = "Movie Deleted Successfully";

/// Client for the movie service.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct MovieServiceClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl MovieServiceClient<UreqTransport> {
    /// Client over a ureq agent configured with the timeouts in `config`.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config))
    }

    /// Client for `base_url` with the default timeouts.
    pub fn from_base_url(base_url: &str) -> Self {
        Self::new(&ClientConfig::new(base_url))
    }
}

impl<T: Transport> MovieServiceClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn list_all(&self) -> Result<Vec<MovieRecord>, ClientError> {
        self.exchange(Ok(self.build_list_all()), |r| self.parse_list_all(r))
    }

    pub fn get_by_id(&self, id: u64) -> Result<MovieRecord, ClientError> {
        self.exchange(Ok(self.build_get_by_id(id)), |r| self.parse_get_by_id(r))
    }

    pub fn find_by_name(&self, name: &str) -> Result<Vec<MovieRecord>, ClientError> {
        self.exchange(Ok(self.build_find_by_name(name)), |r| self.parse_find_by_name(r))
    }

    pub fn find_by_year(&self, year: i32) -> Result<Vec<MovieRecord>, ClientError> {
        self.exchange(Ok(self.build_find_by_year(year)), |r| self.parse_find_by_year(r))
    }

    /// Create `movie`; the returned record carries the server-assigned id.
    pub fn create(&self, movie: &MovieRecord) -> Result<MovieRecord, ClientError> {
        self.exchange(self.build_create(movie), |r| self.parse_create(r))
    }

    /// Send the fields present in `movie` as an update of movie `id`.
    pub fn update(&self, id: u64, movie: &MovieRecord) -> Result<MovieRecord, ClientError> {
        self.exchange(self.build_update(id, movie), |r| self.parse_update(r))
    }

    /// Delete movie `id` and return the server's response text.
    pub fn delete_by_id(&self, id: u64) -> Result<String, ClientError> {
        self.exchange(Ok(self.build_delete_by_id(id)), |r| self.parse_delete_by_id(r))
    }

    /// Delete every movie named `name`; returns `DELETE_SUCCESS_MESSAGE`.
    pub fn delete_by_name(&self, name: &str) -> Result<String, ClientError> {
        self.exchange(Ok(self.build_delete_by_name(name)), |r| self.parse_delete_by_name(r))
    }

    /// Run one exchange and log the failure, if any, on its way out.
    fn exchange<R>(
        &self,
        request: Result<HttpRequest, ClientError>,
        parse: impl FnOnce(HttpResponse) -> Result<R, ClientError>,
    ) -> Result<R, ClientError> {
        let result = request.and_then(|request| {
            debug!(method = %request.method, url = %request.url, "sending request");
            let response = self.transport.execute(request)?;
            debug!(status = response.status, "received response");
            parse(response)
        });
        if let Err(err) = &result {
            error!(
                kind = ?err.kind(),
                status = ?err.status(),
                "movie service call failed: {err}"
            );
        }
        result
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_list_all(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, MOVIES_V1)
    }

    pub fn build_get_by_id(&self, id: u64) -> HttpRequest {
        self.bodyless(HttpMethod::Get, &routes::expand(MOVIE_BY_ID_V1, id))
    }

    pub fn build_find_by_name(&self, name: &str) -> HttpRequest {
        let target = routes::with_query(MOVIE_BY_NAME_V1, routes::MOVIE_NAME_PARAM, name);
        self.bodyless(HttpMethod::Get, &target)
    }

    pub fn build_find_by_year(&self, year: i32) -> HttpRequest {
        let target = routes::with_query(MOVIE_BY_YEAR_V1, routes::YEAR_PARAM, &year.to_string());
        self.bodyless(HttpMethod::Get, &target)
    }

    pub fn build_create(&self, movie: &MovieRecord) -> Result<HttpRequest, ClientError> {
        self.with_json_body(HttpMethod::Post, MOVIES_V1, movie)
    }

    pub fn build_update(&self, id: u64, movie: &MovieRecord) -> Result<HttpRequest, ClientError> {
        self.with_json_body(HttpMethod::Put, &routes::expand(MOVIE_BY_ID_V1, id), movie)
    }

    pub fn build_delete_by_id(&self, id: u64) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, &routes::expand(MOVIE_BY_ID_V1, id))
    }

    pub fn build_delete_by_name(&self, name: &str) -> HttpRequest {
        let target = routes::with_query(MOVIE_BY_NAME_V1, routes::MOVIE_NAME_PARAM, name);
        self.bodyless(HttpMethod::Delete, &target)
    }

    fn bodyless(&self, method: HttpMethod, target: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{target}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json_body<B: Serialize>(
        &self,
        method: HttpMethod,
        target: &str,
        body: &B,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(body).map_err(ClientError::encode)?;
        Ok(HttpRequest {
            method,
            url: format!("{}{target}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_list_all(&self, response: HttpResponse) -> Result<Vec<MovieRecord>, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<MovieRecord, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_find_by_name(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<MovieRecord>, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_find_by_year(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<MovieRecord>, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<MovieRecord, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<MovieRecord, ClientError> {
        decode(check_status(response)?)
    }

    pub fn parse_delete_by_id(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(response)
    }

    pub fn parse_delete_by_name(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(response)?;
        Ok(DELETE_SUCCESS_MESSAGE.to_string())
    }
}

/// Pass a 2xx body through; turn anything else into a status error.
fn check_status(response: HttpResponse) -> Result<String, ClientError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ClientError::from_status(response.status, &response.body))
    }
}

fn decode<R: DeserializeOwned>(body: String) -> Result<R, ClientError> {
    serde_json::from_str(&body).map_err(ClientError::decode)
}
