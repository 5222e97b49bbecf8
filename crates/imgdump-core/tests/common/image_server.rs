//! Minimal HTTP/1.1 server serving `/files/ps2/images/static/<id>.png` for integration tests.
//!
//! Each ID has a script of replies consumed one per request; once the
//! script is exhausted the last reply repeats. Unscripted IDs get 404.
//! Every request is counted per ID.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

const PATH_PREFIX: &str = "/files/ps2/images/static/";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

#[derive(Default)]
struct State {
    scripts: HashMap<u64, Vec<Reply>>,
    hits: HashMap<u64, usize>,
}

#[derive(Clone)]
pub struct ImageServer {
    pub base_url: String,
    state: Arc<Mutex<State>>,
}

impl ImageServer {
    /// Starts the server in a background thread; it runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            state,
        }
    }

    /// Serve `replies` in order for `id`.
    pub fn script(&self, id: u64, replies: Vec<Reply>) {
        self.state.lock().unwrap().scripts.insert(id, replies);
    }

    /// Serve the same valid body for `id` forever.
    pub fn serve(&self, id: u64, body: Vec<u8>) {
        self.script(id, vec![Reply::ok(body)]);
    }

    pub fn hits(&self, id: u64) -> usize {
        self.state.lock().unwrap().hits.get(&id).copied().unwrap_or(0)
    }

    /// IDs requested at least once, ascending.
    pub fn requested_ids(&self) -> Vec<u64> {
        let state = self.state.lock().unwrap();
        let mut ids: Vec<u64> = state.hits.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }
}

fn reply_for(state: &Mutex<State>, id: u64) -> Reply {
    let mut state = state.lock().unwrap();
    let n = {
        let hits = state.hits.entry(id).or_insert(0);
        *hits += 1;
        *hits
    };
    match state.scripts.get(&id) {
        Some(script) if !script.is_empty() => script[(n - 1).min(script.len() - 1)].clone(),
        _ => Reply::status(404),
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("");
    let id = path
        .strip_prefix(PATH_PREFIX)
        .and_then(|name| name.strip_suffix(".png"))
        .and_then(|stem| stem.parse::<u64>().ok());

    let reply = match id {
        Some(id) => reply_for(state, id),
        None => Reply::status(400),
    };
    let head = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n",
        reply.status,
        reply.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&reply.body);
}
