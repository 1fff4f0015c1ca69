use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use config::{ProviderConfig, ProviderName};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::{Error, Fallback, Handler, Request};

pub enum Outcome {
    Answer(&'static str),
    Unreachable,
    Rejected(&'static str),
    NoResult,
}

pub struct StubHandler {
    provider: ProviderName,
    outcome: Outcome,
    check_fails: AtomicBool,
    seen: Mutex<Vec<Request>>,
    pub calls: AtomicUsize,
}

impl StubHandler {
    pub fn new(provider: ProviderName, outcome: Outcome) -> StubHandler {
        StubHandler {
            provider,
            outcome,
            check_fails: AtomicBool::new(false),
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_check(&self) {
        self.check_fails.store(true, Ordering::SeqCst);
    }

    pub fn seen(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Handler for StubHandler {
    fn provider(&self) -> ProviderName {
        self.provider
    }

    fn check(&self, _config: &ProviderConfig) -> Result<(), Error> {
        if self.check_fails.load(Ordering::SeqCst) {
            return Err(Error::InvalidCredentials);
        }

        Ok(())
    }

    async fn translate(&self, request: &Request, _config: &ProviderConfig) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());

        match &self.outcome {
            Outcome::Answer(text) => Ok(text.to_string()),
            Outcome::Unreachable => {
                let err = reqwest::Client::new()
                    .get("not a url")
                    .build()
                    .expect_err("relative url");
                Err(Error::Unreachable(err))
            }
            Outcome::Rejected(msg) => Err(Error::Rejected(msg.to_string())),
            Outcome::NoResult => Err(Error::NoResult),
        }
    }
}

#[derive(Default)]
pub struct CountingFallback {
    pub calls: AtomicUsize,
}

impl Fallback for CountingFallback {
    fn translate(&self, request: &Request) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);

        format!("fallback:{}", request.text())
    }
}

/// Raw requests received by a [`serve`] endpoint: request line, headers and body.
pub type Received = Arc<Mutex<Vec<String>>>;

/// Starts a local HTTP endpoint answering every request with `status` and
/// the json `body`. Returns its base url.
pub async fn serve(status: u16, body: &'static str) -> (String, Received) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Received::default();

    tokio::spawn({
        let received = received.clone();
        async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let raw = read_request(&mut stream).await;
                received.lock().unwrap().push(raw);
                let response = format!(
                    "HTTP/1.1 {status} STATUS\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        }
    });

    (format!("http://{addr}"), received)
}

/// An address nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}")
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let Ok(read) = stream.read(&mut buf).await else {
            break;
        };
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buf[..read]);

        let Some(head_end) = data.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&data[..head_end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .filter_map(|line| line.strip_prefix("content-length:"))
            .find_map(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if data.len() >= head_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&data).into_owned()
}
