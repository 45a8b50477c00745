//! Scripted local HTTP server for client tests.
//!
//! Binds a real TCP listener so the blocking client exercises its whole
//! stack. Every response closes its connection, which keeps the accept
//! loop strictly one request at a time even when callers dispatch
//! concurrently.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// "METHOD path body" in one line, for substring assertions.
    pub fn summary(&self) -> String {
        format!("{} {} {}", self.method, self.path, self.body)
    }
}

struct ScriptEntry {
    matcher: Option<String>,
    status: u16,
    body: String,
}

pub struct MockApi {
    base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl MockApi {
    /// Serves responses strictly in request order.
    pub fn sequential(responses: Vec<(u16, String)>) -> Self {
        Self::start(
            responses
                .into_iter()
                .map(|(status, body)| ScriptEntry {
                    matcher: None,
                    status,
                    body,
                })
                .collect(),
        )
    }

    /// Serves each response to the first request whose "METHOD path body"
    /// line contains its matcher, regardless of arrival order.
    pub fn matched(responses: Vec<(&str, u16, String)>) -> Self {
        Self::start(
            responses
                .into_iter()
                .map(|(matcher, status, body)| ScriptEntry {
                    matcher: Some(matcher.to_string()),
                    status,
                    body,
                })
                .collect(),
        )
    }

    fn start(mut script: Vec<ScriptEntry>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture listener");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            while !script.is_empty() {
                let (mut stream, _) = listener.accept().expect("accept");
                let request = read_request(&mut stream);
                let key = request.summary();
                let position = script
                    .iter()
                    .position(|entry| {
                        entry
                            .matcher
                            .as_deref()
                            .is_none_or(|matcher| key.contains(matcher))
                    })
                    .unwrap_or_else(|| panic!("no scripted response for: {key}"));
                let entry = script.remove(position);
                respond(&mut stream, entry.status, &entry.body);
                recorded.push(request);
            }
            recorded
        });

        Self { base_url, handle }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the script to drain and returns what the server saw.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("fixture server thread")
    }
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request");
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(position) = find_blank_line(&buffer) {
            break position;
        }
        if n == 0 {
            break buffer.len();
        }
    };

    let header_text = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut request_line = header_text.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let content_length = header_text
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    let body_start = (header_end + 4).min(buffer.len());
    let mut body = buffer[body_start..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).expect("read body");
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    RecordedRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn find_blank_line(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn respond(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "OK",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(response.as_bytes())
        .expect("write response");
}
