#![allow(dead_code)]

use httpmock::MockServer;
use mxfinance_rs::{
    CellValue, MemoryStore, MxClient, MxError, Transport, TransportRequest, TransportResponse,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::{fs, future::Future, pin::Pin};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

pub const TOKEN: &str = "tok-123";
pub const API_PATH: &str = "/wp-json/mx/v1";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn api_base(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}/", server.base_url(), API_PATH)).unwrap()
}

pub fn api_path(endpoint: &str) -> String {
    format!("{API_PATH}/{endpoint}")
}

/// A client pointed at `server` with an empty credential store.
pub fn logged_out(server: &MockServer) -> MxClient {
    MxClient::builder()
        .api_base(api_base(server))
        .credential_store(Arc::new(MemoryStore::new()))
        .build()
        .unwrap()
}

/// A client pointed at `server` holding [`TOKEN`].
pub fn logged_in(server: &MockServer) -> MxClient {
    MxClient::builder()
        .api_base(api_base(server))
        .credential_store(Arc::new(MemoryStore::with_token(TOKEN)))
        .build()
        .unwrap()
}

/// A logged-in client whose requests go to a port nothing listens on.
pub fn unreachable() -> MxClient {
    MxClient::builder()
        .api_base(Url::parse("http://127.0.0.1:1/wp-json/mx/v1/").unwrap())
        .credential_store(Arc::new(MemoryStore::with_token(TOKEN)))
        .build()
        .unwrap()
}

/// A logged-in client whose server sends `status` with a `Content-Length` it never fulfils:
/// the status line and headers arrive, then the connection closes mid-body.
pub async fn broken_body(status: u16) -> MxClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = format!(
                    "HTTP/1.1 {status} Whatever\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: 500\r\n\
                     Connection: close\r\n\r\n\
                     {{\"message\":"
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.flush().await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MxClient::builder()
        .api_base(Url::parse(&format!("http://{addr}{API_PATH}/")).unwrap())
        .credential_store(Arc::new(MemoryStore::with_token(TOKEN)))
        .build()
        .unwrap()
}

pub fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

pub fn num(n: i64) -> CellValue {
    CellValue::from(n)
}

/// Answers every request with the same response and remembers what was asked.
#[derive(Debug)]
pub struct StaticTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
    seen: Mutex<Vec<TransportRequest>>,
}

impl StaticTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<TransportRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Transport for StaticTransport {
    fn send<'a>(
        &'a self,
        req: TransportRequest,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, MxError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(req);
        let resp = TransportResponse {
            status: self.status,
            body: self.body.clone(),
        };
        Box::pin(async move { Ok(resp) })
    }
}

/// A client backed by `transport` with the given store.
pub fn with_transport(transport: Arc<StaticTransport>, store: MemoryStore) -> MxClient {
    MxClient::builder()
        .transport(transport)
        .credential_store(Arc::new(store))
        .build()
        .unwrap()
}
