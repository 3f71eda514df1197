//! Minimal HTTP/1.1 server that serves a fixed set of paths for integration tests.
//!
//! Responds 200 with the configured body for known paths and 404 otherwise,
//! and counts requests per path so tests can tell cache hits from network trips.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct AssetServer {
    pub base_url: String,
    routes: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl AssetServer {
    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }

    /// Serve `body` at `path` from now on.
    pub fn set(&self, path: &str, body: &[u8]) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_vec());
    }

    pub fn remove(&self, path: &str) {
        self.routes.lock().unwrap().remove(path);
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Starts a server in a background thread serving `routes` (path -> body).
pub fn start(routes: &[(&str, &[u8])]) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let server = AssetServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        routes: Arc::new(Mutex::new(
            routes
                .iter()
                .map(|(p, b)| (p.to_string(), b.to_vec()))
                .collect(),
        )),
        hits: Arc::new(Mutex::new(HashMap::new())),
    };
    let shared = server.clone();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let server = shared.clone();
            thread::spawn(move || handle(stream, &server));
        }
    });
    server
}

fn handle(mut stream: std::net::TcpStream, server: &AssetServer) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/").to_string();

    *server.hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream
            .write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let body = server.routes.lock().unwrap().get(&path).cloned();
    let (status, body) = match body {
        Some(b) => ("200 OK", b),
        None => ("404 Not Found", Vec::new()),
    };
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}
