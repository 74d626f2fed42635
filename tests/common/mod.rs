//! Shared utilities for integration testing.

use std::net::SocketAddr;

use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use cjtp_server::config::ServerConfig;
use cjtp_server::net::Listener;
use cjtp_server::{CjtpServer, Shutdown};

/// A server running on an ephemeral loopback port.
///
/// Holds the shutdown coordinator so the accept loop stays alive for
/// the duration of the test.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

/// Start a server with default configuration.
pub async fn start_server() -> TestServer {
    start_server_with(ServerConfig::default()).await
}

/// Start a server with the given configuration on an ephemeral port.
pub async fn start_server_with(mut config: ServerConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".to_string();
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = CjtpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer {
        addr,
        _shutdown: shutdown,
    }
}

/// A test client speaking newline-framed CJTP.
pub struct CjtpClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl CjtpClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    /// Send one request object and read one response.
    pub async fn roundtrip(&mut self, request: &Value) -> Value {
        self.send_raw(&request.to_string()).await;
        self.read_response().await
    }

    /// Write a payload followed by the frame delimiter.
    pub async fn send_raw(&mut self, payload: &str) {
        self.writer.write_all(payload.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
    }

    /// Write a payload with no delimiter (legacy burst client).
    pub async fn send_undelimited(&mut self, payload: &str) {
        self.writer.write_all(payload.as_bytes()).await.unwrap();
        self.writer.flush().await.unwrap();
    }

    pub async fn read_response(&mut self) -> Value {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await.unwrap();
        assert!(read > 0, "server closed the connection");
        serde_json::from_str(line.trim_end()).unwrap()
    }
}

/// Build a request object with the standard fields.
pub fn request(method: &str, path: &str, body: Option<&str>) -> Value {
    let mut object = Map::new();
    object.insert("method".to_string(), Value::String(method.to_string()));
    object.insert("path".to_string(), Value::String(path.to_string()));
    object.insert(
        "date".to_string(),
        Value::String("1691404800".to_string()),
    );
    if let Some(body) = body {
        object.insert("body".to_string(), Value::String(body.to_string()));
    }
    Value::Object(object)
}

/// The status class digit of a response.
pub fn status_class(response: &Value) -> char {
    response["status"]
        .as_str()
        .expect("response has a status")
        .chars()
        .next()
        .expect("status is non-empty")
}
