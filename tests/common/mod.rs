//! Test server harness for integration tests.
//!
//! Spins up the real router on a random port with a throwaway upload dir.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use syncwatch::{
    config::Config,
    relay::Relay,
    routes,
    state::{MediaLog, SessionRegistry},
};

pub type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A test server instance with control handles.
pub struct TestServer {
    addr: SocketAddr,
    relay: Relay,
    #[allow(dead_code)]
    pub media: MediaLog,
    #[allow(dead_code)]
    pub upload_dir: tempfile::TempDir,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with_upload_limit(1024 * 1024).await
    }

    pub async fn with_upload_limit(limit: u64) -> Self {
        let upload_dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config {
            upload_dir: upload_dir.path().to_path_buf(),
            upload_max_bytes: limit,
            ..Config::default()
        };
        let relay = Relay::new(Arc::new(SessionRegistry::new()));
        let media = MediaLog::default();
        let app = routes::app(&cfg, relay.clone(), media.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("failed to bind");
        let addr = listener.local_addr().expect("failed to get local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        Self { addr, relay, media, upload_dir, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    #[allow(dead_code)]
    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    pub async fn connect(&self) -> Ws {
        let (ws, _) = connect_async(self.ws_url()).await.expect("Failed to connect");
        ws
    }

    pub fn shutdown(self) {
        self.relay.close();
        self.handle.abort();
    }
}

/// Receive and parse one JSON frame, `None` on timeout or close.
pub async fn recv_json(ws: &mut Ws) -> Option<Value> {
    let msg = timeout(Duration::from_secs(5), ws.next()).await.ok()??.ok()?;
    match msg {
        Message::Text(text) => serde_json::from_str(&text).ok(),
        _ => None,
    }
}

/// Skip frames until one of `msg_type` arrives.
pub async fn recv_type(ws: &mut Ws, msg_type: &str) -> Value {
    for _ in 0..16 {
        match recv_json(ws).await {
            Some(msg) if msg["type"] == msg_type => return msg,
            Some(_) => continue,
            None => break,
        }
    }
    panic!("no {msg_type} frame received");
}

/// True when nothing arrives within `ms`.
#[allow(dead_code)]
pub async fn silent_for(ws: &mut Ws, ms: u64) -> bool {
    timeout(Duration::from_millis(ms), ws.next()).await.is_err()
}

pub async fn send_json(ws: &mut Ws, value: &Value) {
    ws.send(Message::Text(value.to_string())).await.expect("send failed");
}

/// Connect and join, draining the joiner's catch-up frames.
#[allow(dead_code)]
pub async fn join(server: &TestServer, room: &str, name: &str) -> (Ws, Value) {
    let mut ws = server.connect().await;
    send_json(&mut ws, &serde_json::json!({ "type": "joinRoom", "roomId": room, "name": name })).await;
    let joined = recv_type(&mut ws, "roomJoined").await;
    recv_type(&mut ws, "roomState").await;
    (ws, joined)
}
