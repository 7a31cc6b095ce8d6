//! Servers shared by the integration suites.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Start the mock movie service seeded with `movies` on a random port and
/// return its base URL.
pub fn spawn_mock_server(movies: Vec<mock_server::Movie>) -> String {
    let std_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, mock_server::app_with(movies)).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// What a one-shot raw server does after reading the request head.
pub enum Fault {
    /// Close the connection without writing anything.
    EmptyResponse,
    /// Write these bytes verbatim, then close.
    Raw(Vec<u8>),
    /// Hold the connection open without answering.
    Stall(Duration),
}

/// Accept a single connection, read the request head and apply `fault`.
pub fn spawn_fault_server(fault: Fault) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        read_request_head(&mut stream);
        match fault {
            Fault::EmptyResponse => {}
            Fault::Raw(bytes) => {
                let _ = stream.write_all(&bytes);
                let _ = stream.flush();
            }
            Fault::Stall(duration) => thread::sleep(duration),
        }
    });

    format!("http://{addr}")
}

/// Build a raw HTTP/1.1 response with a correct content-length.
pub fn raw_response(status_line: &str, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes()
}

fn read_request_head(stream: &mut TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
