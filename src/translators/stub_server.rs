//! Minimal HTTP/1.1 server standing in for the translation site in tests.
//!
//! Each path answers from a script of bodies: bodies are served in order and
//! the last one is repeated once the others are used up. Unknown paths get a
//! 404. Every request is recorded, form body included, before it is answered.

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One request received by the server.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub form: Vec<(String, String)>,
}

impl Request {
    /// Value of a form field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

type Routes = HashMap<String, VecDeque<String>>;

pub struct StubServer {
    base: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl StubServer {
    /// Starts a server in a background thread. Route paths are relative to
    /// `prefix`, e.g. `"/"` and `"/v2transapi"` under `"/baidu"`.
    pub fn start(prefix: &str, routes: Vec<(&str, Vec<String>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();

        let routes: Routes = routes
            .into_iter()
            .map(|(path, bodies)| (format!("{}{}", prefix, path), bodies.into()))
            .collect();
        let routes = Arc::new(Mutex::new(routes));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });

        Self {
            base: format!("http://127.0.0.1:{}{}", port, prefix),
            requests,
        }
    }

    /// Base URL to use as the translator host.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received for `method` and `path`.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

fn handle(mut stream: TcpStream, routes: &Mutex<Routes>, log: &Mutex<Vec<Request>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let body = {
        let mut routes = routes.lock().unwrap();
        match routes.get_mut(&request.path) {
            Some(bodies) if bodies.len() > 1 => bodies.pop_front(),
            Some(bodies) => bodies.front().cloned(),
            None => None,
        }
    };
    log.lock().unwrap().push(request);

    let (status, body) = match body {
        Some(body) => ("200 OK", body),
        None => ("404 Not Found", String::new()),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];

    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let end = data.len().min(header_end + content_length);

    let mut request_line = head.lines().next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?;
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    };

    Some(Request {
        method,
        path,
        query,
        form: url::form_urlencoded::parse(&data[header_end..end])
            .into_owned()
            .collect(),
    })
}
