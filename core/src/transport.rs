//! The network side of a call.
//!
//! # Design
//! `Transport` is the only seam that performs I/O. `UreqTransport` is the
//! blocking default: status codes come back as data (never as errors) so the
//! client can normalize them itself, and every ureq failure is classified as
//! either a timeout or a transport error.

use std::{fmt, io};

use ureq::{Agent, RequestBuilder};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one `HttpRequest` and returns the complete response.
///
/// Implementations must return `Ok` for any response the server sent,
/// whatever its status, and `Err` only when no complete response was read.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ClientError> + Send + Sync,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self(request)
    }
}

/// Blocking transport backed by a ureq agent.
///
/// The agent pools connections internally and is safe to share between
/// threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(config.connect_timeout))
            .timeout_send_request(Some(config.write_timeout))
            .timeout_send_body(Some(config.write_timeout))
            .timeout_recv_response(Some(config.read_timeout))
            .timeout_recv_body(Some(config.read_timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
        };
        let mut response = result.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Error bodies are not required to be UTF-8; the status must survive them.
        let bytes = response.body_mut().read_to_vec().map_err(classify)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Map a ureq failure to the matching `ClientError` kind.
fn classify(err: ureq::Error) -> ClientError {
    let timed_out = match &err {
        ureq::Error::Timeout(_) => true,
        ureq::Error::Io(io_err) => {
            matches!(io_err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
        }
        _ => false,
    };
    if timed_out {
        ClientError::timeout(err)
    } else {
        ClientError::transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn io_timeouts_are_classified_as_timeout() {
        let err = classify(ureq::Error::Io(io::Error::new(io::ErrorKind::TimedOut, "read timed out")));
        assert_eq!(err.kind(), ErrorKind::Timeout);

        let err = classify(ureq::Error::Io(io::Error::new(io::ErrorKind::WouldBlock, "would block")));
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[test]
    fn other_io_errors_are_transport() {
        let err = classify(ureq::Error::Io(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        )));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.message().contains("connection reset by peer"));
    }

    #[test]
    fn closures_are_transports() {
        let transport = |request: HttpRequest| {
            Ok::<_, ClientError>(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: request.url,
            })
        };
        let response = transport
            .execute(HttpRequest {
                method: HttpMethod::Delete,
                url: "http://localhost/movies".to_string(),
                headers: Vec::new(),
                body: None,
            })
            .unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(response.body, "http://localhost/movies");
    }

    #[test]
    fn refused_connection_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = UreqTransport::new(&ClientConfig::new(&format!("http://127.0.0.1:{port}")));
        let err = transport
            .execute(HttpRequest {
                method: HttpMethod::Get,
                url: format!("http://127.0.0.1:{port}/movies/v1/movie_infos"),
                headers: Vec::new(),
                body: None,
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.message().is_empty());
    }
}
