//! MCP Server implementation
//!
//! Serves the SSE tool protocol over HTTP: `GET /sse` announces the tool
//! catalog and keeps the stream alive, `POST /sse` invokes a tool and answers
//! with a result or error envelope in the response body.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{
        sse::{Event, Sse},
        IntoResponse,
    },
    routing::get,
    Json, Router,
};
use futures_util::{Stream, StreamExt};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, CredentialSource};
use crate::error::{McpError, Result};
use crate::llm::client::LlmClient;
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;

/// Path serving both the event stream and tool invocation
pub const SSE_PATH: &str = "/sse";

/// Shared server handle used as router state
pub type SharedServer = Arc<McpServer>;

/// MCP Server for the structure processor
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,

    /// Serialized `init` event, built once at startup
    init_event: String,

    /// Serialized `ping` event
    ping_event: String,

    /// Interval between pings
    ping_interval: Duration,
}

impl McpServer {
    /// Create a new MCP server.
    ///
    /// Fails if the tool catalog cannot be serialized.
    pub fn new(config: &Config, credentials: Arc<dyn CredentialSource>) -> Result<Self> {
        let llm = LlmClient::new(config)?;
        let tool_handler = ToolHandler::new(llm, credentials);

        let init_event = serde_json::to_string(&StreamEvent::init(tool_handler.list_tools()))?;
        let ping_event = serde_json::to_string(&StreamEvent::Ping)?;

        Ok(Self {
            tool_handler,
            init_event,
            ping_event,
            ping_interval: config.ping_interval,
        })
    }

    /// Serve on an address until the process stops
    pub async fn serve(self: Arc<Self>, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Structure processor MCP server listening on http://{}", addr);

        axum::serve(listener, router(self)).await?;
        Ok(())
    }

    /// Event payloads for one stream: `init` first, then `ping` forever.
    pub fn event_stream(&self) -> impl Stream<Item = String> + Send + 'static {
        let init_event = self.init_event.clone();
        let ping_event = self.ping_event.clone();
        let ping_interval = self.ping_interval;

        stream! {
            yield init_event;
            loop {
                tokio::time::sleep(ping_interval).await;
                yield ping_event.clone();
            }
        }
    }

    /// Handle a raw `POST /sse` body
    pub async fn dispatch(&self, body: &[u8]) -> ResponseEnvelope {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.dispatch_value(value).await,
            Err(e) => {
                tracing::warn!("Unparseable request body: {}", e);
                ResponseEnvelope::error(None, e.to_string())
            }
        }
    }

    /// Handle a decoded `POST /sse` body
    pub async fn dispatch_value(&self, body: Value) -> ResponseEnvelope {
        let kind = body.get("type");
        if kind.and_then(Value::as_str) != Some(INVOKE) {
            let err = McpError::UnknownRequestType {
                kind: describe(kind),
            };
            return ResponseEnvelope::error(None, err.to_string());
        }

        // Read the correlation ID on its own so it survives a malformed envelope
        let request_id = body
            .get("requestId")
            .filter(|id| !id.is_null())
            .cloned()
            .map(RequestId::from);

        let envelope: InvokeEnvelope = match serde_json::from_value(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let err = McpError::InvalidEnvelope {
                    message: e.to_string(),
                };
                return ResponseEnvelope::error(request_id, err.to_string());
            }
        };

        let name = describe(envelope.name.as_ref());

        let tool = match self.tool_handler.resolve(&name) {
            Ok(tool) => tool,
            Err(e) => {
                tracing::warn!(request_id = ?request_id, "{}", e);
                return ResponseEnvelope::error(request_id, e.to_string());
            }
        };

        tracing::info!(tool = %name, request_id = ?request_id, "Invoking tool");

        match self.tool_handler.call_tool(tool, envelope.params).await {
            Ok(result) => ResponseEnvelope::result(request_id, result),
            Err(e) => {
                tracing::error!(tool = %name, request_id = ?request_id, "Error processing request: {}", e);
                ResponseEnvelope::error(request_id, e.client_message())
            }
        }
    }
}

/// Build the HTTP router
pub fn router(server: SharedServer) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SSE_PATH, get(handle_event_stream).post(handle_invoke))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(server)
}

/// `GET /sse`
async fn handle_event_stream(State(server): State<SharedServer>) -> impl IntoResponse {
    tracing::debug!("Event stream opened");

    let events = server
        .event_stream()
        .map(|data| Ok::<Event, Infallible>(Event::default().data(data)));

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(events),
    )
}

/// `POST /sse`
async fn handle_invoke(State(server): State<SharedServer>, body: Bytes) -> Json<ResponseEnvelope> {
    Json(server.dispatch(&body).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticCredentials;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(&Config::new(), Arc::new(StaticCredentials::default())).unwrap()
    }

    #[test]
    fn test_init_event_lists_tools() {
        let init: Value = serde_json::from_str(&server().init_event).unwrap();
        assert_eq!(init["type"], "init");
        assert_eq!(
            init["tools"]["process_financial_data"]["description"],
            "Fetch and format financial data in one step"
        );
    }

    #[tokio::test]
    async fn test_unknown_request_type() {
        let response = server().dispatch_value(json!({"type": "subscribe", "requestId": "r1"})).await;
        assert_eq!(
            response,
            ResponseEnvelope::error(None, "Unknown request type: subscribe")
        );
    }

    #[tokio::test]
    async fn test_missing_type() {
        let response = server().dispatch_value(json!({"name": "x"})).await;
        assert_eq!(response, ResponseEnvelope::error(None, "Unknown request type: None"));
    }

    #[tokio::test]
    async fn test_unparseable_body() {
        let response = server().dispatch(b"{not json").await;
        assert!(response.is_error());
        assert!(matches!(response, ResponseEnvelope::Error { request_id: None, .. }));
    }

    #[tokio::test]
    async fn test_non_string_name_keeps_request_id() {
        let response = server()
            .dispatch_value(json!({"type": "invoke", "name": 5, "requestId": "r1", "params": {}}))
            .await;
        assert_eq!(
            response,
            ResponseEnvelope::error(Some(RequestId::from("r1")), "Unknown tool: 5")
        );
    }

    #[tokio::test]
    async fn test_request_ids_of_any_type_are_echoed() {
        for id in [json!(1.5), json!(u64::MAX), json!(-3), json!(false)] {
            let response = server()
                .dispatch_value(json!({"type": "invoke", "name": "missing", "requestId": id.clone()}))
                .await;
            assert_eq!(
                response,
                ResponseEnvelope::error(Some(RequestId::from(id)), "Unknown tool: missing")
            );
        }
    }

    #[tokio::test]
    async fn test_missing_name() {
        let response = server()
            .dispatch_value(json!({"type": "invoke", "requestId": "r9"}))
            .await;
        assert_eq!(
            response,
            ResponseEnvelope::error(Some(RequestId::from("r9")), "Unknown tool: None")
        );
    }
}
