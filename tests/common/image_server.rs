//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body for HEAD and GET and counts requests per
//! method so tests can assert that no network traffic happened.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ImageServerOptions {
    /// If false, HEAD returns 405 (simulates CDNs that block HEAD).
    pub head_allowed: bool,
    /// Status line sent for both HEAD and GET.
    pub status: &'static str,
    /// If true, GET advertises the full length but closes after half the body.
    pub truncate_body: bool,
    /// Content-Length sent in the HEAD answer instead of the body length.
    pub head_length: Option<usize>,
}

impl Default for ImageServerOptions {
    fn default() -> Self {
        Self {
            head_allowed: true,
            status: "200 OK",
            truncate_body: false,
            head_length: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Hits {
    pub head: AtomicUsize,
    pub get: AtomicUsize,
}

impl Hits {
    pub fn head(&self) -> usize {
        self.head.load(Ordering::SeqCst)
    }

    pub fn get(&self) -> usize {
        self.get.load(Ordering::SeqCst)
    }
}

pub struct ImageServer {
    /// Base URL of the served image, e.g. `http://127.0.0.1:12345/wallpaper.png`.
    pub url: String,
    pub hits: Arc<Hits>,
}

/// Starts a server in a background thread serving `body`. The server runs
/// until the process exits.
pub fn start(body: Vec<u8>) -> ImageServer {
    start_with_options(body, ImageServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ImageServerOptions) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let hits = Arc::new(Hits::default());
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &body, opts, &hits));
        }
    });
    ImageServer {
        url: format!("http://127.0.0.1:{}/wallpaper.png", port),
        hits,
    }
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: ImageServerOptions, hits: &Hits) {
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
    let method = request.split_whitespace().next().unwrap_or("");
    let total = body.len();

    if method.eq_ignore_ascii_case("HEAD") {
        hits.head.fetch_add(1, Ordering::SeqCst);
        if !opts.head_allowed {
            let _ = stream
                .write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            return;
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n",
            opts.status,
            opts.head_length.unwrap_or(total)
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        hits.get.fetch_add(1, Ordering::SeqCst);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n",
            opts.status, total
        );
        let _ = stream.write_all(response.as_bytes());
        let sent = if opts.truncate_body { &body[..total / 2] } else { body };
        let _ = stream.write_all(sent);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}
