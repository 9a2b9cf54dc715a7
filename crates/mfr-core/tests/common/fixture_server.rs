//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses keyed by request path (query string ignored)
//! and records every request head so tests can assert on sent headers.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// One canned response.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub set_cookie: Option<&'static str>,
}

impl StubResponse {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            set_cookie: None,
        }
    }

    pub fn ok_with_cookie(body: &[u8], cookie: &'static str) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
            set_cookie: Some(cookie),
        }
    }
}

/// Handle to a running fixture server.
pub struct FixtureServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Absolute URL for a path on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request heads seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Unknown paths get a 404.
/// The server runs until the process exits.
pub fn start(routes: Vec<(&str, StubResponse)>) -> FixtureServer {
    let routes: HashMap<String, StubResponse> = routes
        .into_iter()
        .map(|(path, resp)| (path.to_string(), resp))
        .collect();
    let routes = Arc::new(routes);
    let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();

    let requests_acceptor = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let requests = Arc::clone(&requests_acceptor);
            thread::spawn(move || handle(stream, &routes, &requests));
        }
    });

    FixtureServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, StubResponse>,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s.to_string(),
        Err(_) => return,
    };
    requests.lock().unwrap().push(request.clone());

    let path = request_path(&request);
    let not_found = StubResponse {
        status: 404,
        body: Vec::new(),
        set_cookie: None,
    };
    let resp = path
        .and_then(|p| routes.get(p))
        .unwrap_or(&not_found);

    let reason = match resp.status {
        200 => "OK",
        404 => "Not Found",
        _ => "Response",
    };
    let cookie_header = match resp.set_cookie {
        Some(cookie) => format!("Set-Cookie: {}\r\n", cookie),
        None => String::new(),
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        resp.status,
        reason,
        resp.body.len(),
        cookie_header
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&resp.body);
}

/// Path of the request line, query string stripped.
fn request_path(request: &str) -> Option<&str> {
    let line = request.lines().next()?;
    let target = line.split_whitespace().nth(1)?;
    Some(target.split('?').next().unwrap_or(target))
}
