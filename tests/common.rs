#![allow(dead_code)]

use std::sync::Arc;

use elms_client::api::ApiClient;
use elms_client::config::{parse_config, ConfigV1};
use elms_client::models::TokenPair;
use elms_client::session::SessionManager;
use elms_client::store::{MemoryStore, TokenStore};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Build a config pointing at a mock backend. The server URL stands in for the
/// host; every endpoint lives under `/api`.
pub fn config_for(server_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{}/api"
store:
  type: memory
logging:
  level: "debug"
  format: "json"
"#,
        server_url
    );
    parse_config(&yaml).expect("Failed to parse test config YAML")
}

/// A session manager wired to a memory store, optionally seeded with tokens.
/// The store is handed back too so tests can inspect it directly.
pub fn build_session(
    server_url: &str,
    tokens: Option<TokenPair>,
) -> (SessionManager, Arc<dyn TokenStore>) {
    let config = config_for(server_url);
    let store: Arc<dyn TokenStore> = match tokens {
        Some(pair) => Arc::new(MemoryStore::with_tokens(pair)),
        None => Arc::new(MemoryStore::new()),
    };
    let manager = SessionManager::from_config(&config.api, store.clone());
    (manager, store)
}

/// A bare client whose bearer token comes from `store`.
pub fn build_client(server_url: &str, store: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::new(&config_for(server_url).api, store)
}

pub fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.com", username),
        "role": role,
        "first_name": "Test",
        "last_name": "User",
        "phone": "0700000000"
    })
}

pub fn token_json(access: &str, refresh: &str) -> String {
    json!({ "access": access, "refresh": refresh }).to_string()
}

/// Read one request head off a raw socket, so a hand-written response can follow.
pub async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.expect("request should be readable");
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
    }
}

/// Write a raw HTTP/1.1 response and close the connection.
pub async fn write_response(socket: &mut TcpStream, raw: &str) {
    socket
        .write_all(raw.as_bytes())
        .await
        .expect("response should be writable");
    socket.shutdown().await.ok();
}

pub fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}
