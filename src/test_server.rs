//! Minimal HTTP/1.1 server for unit tests.
//!
//! Serves canned responses keyed by request path (query string ignored) and
//! counts how often each path was requested. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: Vec<u8>,
    pub location: Option<String>,
    /// Content-Length to announce instead of the real body length.
    pub declared_len: Option<usize>,
}

impl Route {
    pub fn ok(path: &str, body: Vec<u8>) -> Self {
        Route {
            path: path.to_string(),
            status: 200,
            body,
            location: None,
            declared_len: None,
        }
    }

    pub fn status(path: &str, status: u16) -> Self {
        Route {
            path: path.to_string(),
            status,
            body: Vec::new(),
            location: None,
            declared_len: None,
        }
    }

    pub fn redirect(path: &str, location: &str) -> Self {
        Route {
            location: Some(location.to_string()),
            ..Route::status(path, 302)
        }
    }

    /// Announces `declared_len` bytes, sends `body`, then closes the connection.
    pub fn truncated(path: &str, body: Vec<u8>, declared_len: usize) -> Self {
        Route {
            declared_len: Some(declared_len),
            ..Route::ok(path, body)
        }
    }
}

pub struct TestServer {
    base: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    /// Starts the server on a background thread. It runs until the test process exits.
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> =
            Arc::new(routes.into_iter().map(|r| (r.path.clone(), r)).collect());
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let thread_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&thread_hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });

        TestServer {
            base: format!("http://127.0.0.1:{}", port),
            hits,
        }
    }

    /// A URL on a port nothing listens on.
    pub fn unused_url(path: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}{}", port, path)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

/// Production client settings, minus any proxy from the environment.
pub fn client() -> Client {
    crate::apod::client_builder().no_proxy().build().expect("test client")
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &Mutex<HashMap<String, usize>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target).to_string();

    *hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    let not_found = Route::status(&path, 404);
    let route = routes.get(&path).unwrap_or(&not_found);
    let body = route.body.as_slice();
    let location = route
        .location
        .as_ref()
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.declared_len.unwrap_or(body.len()),
        location
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
