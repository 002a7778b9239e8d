//! HTTP JSON-RPC transport for communicating with MCP servers.
//!
//! Implements the MCP protocol over HTTP POST (JSON-RPC 2.0).
//! Reference: <https://spec.modelcontextprotocol.io/>

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use mcphub_core::domain::{AuthType, RawTool};
use mcphub_core::ports::{ToolTransport, TransportError, TransportFactory};

use crate::auth::build_headers;

/// Protocol version this client speaks. Servers reporting a different
/// version are rejected at handshake time.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Fixed per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: Option<u64>,
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(rename = "data")]
    _data: Option<Value>,
}

/// MCP initialize result.
#[derive(Debug, Clone, Deserialize)]
struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    protocol_version: String,
    #[serde(rename = "serverInfo", default)]
    server_info: Option<ServerInfo>,
}

/// Server information from initialize.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    /// Server-reported name.
    pub name: String,
    /// Server-reported version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Stateless HTTP transport: every JSON-RPC call is one POST to the
/// server's endpoint URL.
pub struct HttpTransport {
    endpoint: Option<Url>,
    http: Option<reqwest::Client>,
    request_id: AtomicU64,
    server_info: Option<ServerInfo>,
}

impl HttpTransport {
    /// Create a new transport (not yet connected).
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: None,
            http: None,
            request_id: AtomicU64::new(1),
            server_info: None,
        }
    }

    /// Server info reported at handshake time, if connected.
    pub const fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    /// Send a JSON-RPC request and wait for the response payload.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, TransportError> {
        let endpoint = self.endpoint.as_ref().ok_or(TransportError::NotConnected)?;
        let http = self.http.as_ref().ok_or(TransportError::NotConnected)?;

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method: method.to_string(),
            params,
        };

        let response = http
            .post(endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Transport(format!(
                "server returned HTTP {status}"
            )));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Transport(format!("malformed JSON-RPC response: {e}")))?;

        if let Some(err) = body.error {
            return Err(TransportError::Protocol {
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .ok_or_else(|| TransportError::Transport("missing result in response".to_string()))
    }

    /// Send a JSON-RPC notification (no id, response ignored).
    async fn notify(&self, method: &str) {
        let (Some(endpoint), Some(http)) = (self.endpoint.as_ref(), self.http.as_ref()) else {
            return;
        };

        let notification = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": {}
        });

        // Best effort; some servers do not accept notifications over HTTP
        if let Err(e) = http.post(endpoint.clone()).json(&notification).send().await {
            tracing::debug!(method, error = %e, "MCP notification not delivered");
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::ConnectFailed(e.to_string())
    } else {
        TransportError::Transport(e.to_string())
    }
}

#[async_trait]
impl ToolTransport for HttpTransport {
    async fn connect(
        &mut self,
        url: &str,
        auth_type: AuthType,
        auth_config: Option<&str>,
    ) -> Result<(), TransportError> {
        let endpoint = Url::parse(url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        match endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(TransportError::UnsupportedScheme(other.to_string())),
        }

        // Credentials are validated before the first round trip
        let headers = build_headers(auth_type, auth_config)?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Transport(e.to_string()))?;

        self.endpoint = Some(endpoint);
        self.http = Some(http);

        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": "mcphub",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {}
        });

        let result = match self.request("initialize", Some(params)).await {
            Ok(value) => value,
            Err(e) => {
                self.close().await;
                // Connection-level failures keep their own variant
                return Err(match e {
                    TransportError::ConnectFailed(_) | TransportError::Timeout => e,
                    other => TransportError::HandshakeFailed(other.to_string()),
                });
            }
        };

        let init: InitializeResult = match serde_json::from_value(result) {
            Ok(init) => init,
            Err(e) => {
                self.close().await;
                return Err(TransportError::HandshakeFailed(format!(
                    "malformed initialize result: {e}"
                )));
            }
        };

        if init.protocol_version != PROTOCOL_VERSION {
            self.close().await;
            return Err(TransportError::HandshakeFailed(format!(
                "unsupported protocol version: {}",
                init.protocol_version
            )));
        }

        self.server_info = init.server_info;
        self.notify("notifications/initialized").await;

        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<RawTool>, TransportError> {
        let result = self.request("tools/list", None).await?;

        let tools_value = result.get("tools").cloned().unwrap_or_else(|| json!([]));
        serde_json::from_value(tools_value)
            .map_err(|e| TransportError::Transport(format!("malformed tools/list result: {e}")))
    }

    async fn close(&mut self) {
        self.endpoint = None;
        self.http = None;
        self.server_info = None;
    }
}

/// Factory producing fresh HTTP transports.
pub struct HttpTransportFactory;

impl TransportFactory for HttpTransportFactory {
    fn create(&self) -> Box<dyn ToolTransport> {
        Box::new(HttpTransport::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_json_rpc_request_serialization() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "tools/list".to_string(),
            params: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"method\":\"tools/list\""));
        assert!(!json.contains("params")); // Should be omitted when None
    }

    #[test]
    fn test_json_rpc_error_parsing() {
        let json =
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600,"message":"Invalid Request"}}"#;
        let response: JsonRpcResponse = serde_json::from_str(json).unwrap();
        assert!(response.error.is_some());
        assert_eq!(response.error.as_ref().unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url_before_io() {
        let mut transport = HttpTransport::new();

        let err = transport
            .connect("not a url", AuthType::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));

        let err = transport
            .connect("ftp://example.com/rpc", AuthType::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_auth_config_before_io() {
        let mut transport = HttpTransport::new();
        // Unroutable port; a config error must surface without touching it
        let err = transport
            .connect("http://127.0.0.1:1/rpc", AuthType::Bearer, Some("not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::ConfigParse(_)));
    }

    #[tokio::test]
    async fn test_list_tools_requires_connection() {
        let transport = HttpTransport::new();
        let err = transport.list_tools().await.unwrap_err();
        assert!(matches!(err, TransportError::NotConnected));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let mut transport = HttpTransport::new();
        transport.close().await;
        transport.close().await;
        assert!(transport.server_info().is_none());
    }

    /// Minimal canned-response HTTP server. Routes each JSON-RPC request
    /// through `respond` by method name; notifications get an empty 202.
    async fn spawn_mock_server<F>(respond: F) -> SocketAddr
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let respond = std::sync::Arc::new(respond);
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let respond = respond.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    let body = loop {
                        let n = stream.read(&mut chunk).await.unwrap_or(0);
                        if n == 0 {
                            return;
                        }
                        buf.extend_from_slice(&chunk[..n]);
                        let text = String::from_utf8_lossy(&buf);
                        if let Some(split) = text.find("\r\n\r\n") {
                            let headers = &text[..split];
                            let content_length = headers
                                .lines()
                                .find_map(|l| {
                                    l.to_ascii_lowercase()
                                        .strip_prefix("content-length:")
                                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                                })
                                .unwrap_or(0);
                            let body_start = split + 4;
                            if buf.len() >= body_start + content_length {
                                break text[body_start..body_start + content_length].to_string();
                            }
                        }
                    };

                    let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                    let method = parsed.get("method").and_then(Value::as_str).unwrap_or("");

                    let reply = if parsed.get("id").is_none() {
                        // Notification
                        "HTTP/1.1 202 Accepted\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string()
                    } else {
                        let payload = respond(method);
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                            payload.len()
                        )
                    };
                    let _ = stream.write_all(reply.as_bytes()).await;
                });
            }
        });

        addr
    }

    fn initialize_ok(id: u64) -> String {
        format!(
            r#"{{"jsonrpc":"2.0","id":{id},"result":{{"protocolVersion":"2024-11-05","serverInfo":{{"name":"mock","version":"1.0"}},"capabilities":{{"tools":{{}}}}}}}}"#
        )
    }

    #[tokio::test]
    async fn test_handshake_and_list_tools() {
        let addr = spawn_mock_server(|method| match method {
            "initialize" => initialize_ok(1),
            "tools/list" => {
                r#"{"jsonrpc":"2.0","id":2,"result":{"tools":[{"name":"read_file","description":"Read a file","inputSchema":{"type":"object"}},{"name":"ping"}]}}"#.to_string()
            }
            other => panic!("unexpected method {other}"),
        })
        .await;

        let mut transport = HttpTransport::new();
        transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap();
        assert_eq!(transport.server_info().unwrap().name, "mock");

        let tools = transport.list_tools().await.unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "read_file");
        assert!(tools[1].input_schema.is_none());

        transport.close().await;
    }

    #[tokio::test]
    async fn test_handshake_rejects_version_mismatch() {
        let addr = spawn_mock_server(|_| {
            r#"{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"1999-01-01","serverInfo":{"name":"old"},"capabilities":{}}}"#.to_string()
        })
        .await;

        let mut transport = HttpTransport::new();
        let err = transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::HandshakeFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_handshake_leaves_session_closed() {
        let addr = spawn_mock_server(|method| match method {
            "initialize" => r#"{"jsonrpc":"2.0","id":1,"result":{"wrong":"shape"}}"#.to_string(),
            _ => r#"{"jsonrpc":"2.0","id":2,"result":{"tools":[{"name":"t"}]}}"#.to_string(),
        })
        .await;

        let mut transport = HttpTransport::new();
        let err = transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::HandshakeFailed(_)));

        // The failed handshake must not leave a usable session behind
        let err = transport.list_tools().await.unwrap_err();
        assert!(matches!(err, TransportError::NotConnected));
    }

    #[tokio::test]
    async fn test_handshake_surfaces_json_rpc_error() {
        let addr = spawn_mock_server(|_| {
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"denied"}}"#.to_string()
        })
        .await;

        let mut transport = HttpTransport::new();
        let err = transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap_err();
        // A JSON-RPC error during initialize is a handshake failure
        assert!(matches!(err, TransportError::HandshakeFailed(_)));
    }

    #[tokio::test]
    async fn test_list_tools_surfaces_protocol_error() {
        let addr = spawn_mock_server(|method| match method {
            "initialize" => initialize_ok(1),
            _ => r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32601,"message":"no such method"}}"#
                .to_string(),
        })
        .await;

        let mut transport = HttpTransport::new();
        transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap();

        let err = transport.list_tools().await.unwrap_err();
        assert!(matches!(err, TransportError::Protocol { code: -32601, .. }));
    }

    #[tokio::test]
    async fn test_connect_refused_is_connect_failed() {
        // Bind then drop to get a port with no listener
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut transport = HttpTransport::new();
        let err = transport
            .connect(&format!("http://{addr}/rpc"), AuthType::None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::ConnectFailed(_)));
    }
}
