//! MCP SSE protocol type definitions
//!
//! Envelopes exchanged on `/sse`: stream events sent on `GET`, the invoke
//! request accepted on `POST` and the result/error envelopes returned for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope type of an invoke request
pub const INVOKE: &str = "invoke";

/// Request ID, echoed back verbatim whatever its JSON type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RequestId(pub Value);

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId(Value::String(id.to_string()))
    }
}

impl From<Value> for RequestId {
    fn from(id: Value) -> Self {
        RequestId(id)
    }
}

/// Render a JSON value the way it appears in messages and prompts.
///
/// Strings are used as-is, a missing value or `null` renders as `None`,
/// anything else as its JSON text.
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Tool definition as advertised in the `init` event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    /// Tool name; the key of the `tools` map on the wire
    #[serde(skip)]
    pub name: String,

    /// Tool description
    pub description: String,

    /// Parameter schema (JSON Schema)
    pub parameters: Value,
}

/// Events written to the `GET /sse` stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// First event on every stream: the tool catalog
    Init { tools: BTreeMap<String, ToolSchema> },

    /// Keep-alive
    Ping,
}

impl StreamEvent {
    /// Build the `init` event from a list of schemas
    pub fn init(schemas: impl IntoIterator<Item = ToolSchema>) -> Self {
        StreamEvent::Init {
            tools: schemas
                .into_iter()
                .map(|schema| (schema.name.clone(), schema))
                .collect(),
        }
    }
}

/// `POST /sse` invoke request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeEnvelope {
    /// Envelope type (always "invoke")
    #[serde(rename = "type")]
    pub kind: String,

    /// Tool name; kept raw so a non-string name can still be reported
    #[serde(default)]
    pub name: Option<Value>,

    /// Correlation ID
    #[serde(default)]
    pub request_id: Option<RequestId>,

    /// Tool parameters
    #[serde(default = "empty_params", deserialize_with = "params_or_empty")]
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

fn params_or_empty<'de, D>(deserializer: D) -> std::result::Result<Value, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => empty_params(),
        other => other,
    })
}

/// Response to a `POST /sse` request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    /// Successful invocation
    Result {
        #[serde(rename = "requestId")]
        request_id: Option<RequestId>,
        result: ToolResult,
    },

    /// Failed request; `requestId` only when one was parsed from the input
    Error {
        #[serde(
            rename = "requestId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        request_id: Option<RequestId>,
        error: String,
    },
}

impl ResponseEnvelope {
    /// Create a result envelope
    pub fn result(request_id: Option<RequestId>, result: ToolResult) -> Self {
        ResponseEnvelope::Result { request_id, result }
    }

    /// Create an error envelope
    pub fn error(request_id: Option<RequestId>, error: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            request_id,
            error: error.into(),
        }
    }

    /// Whether this is an error envelope
    pub fn is_error(&self) -> bool {
        matches!(self, ResponseEnvelope::Error { .. })
    }
}

/// Tool result content item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    /// Resource content
    Resource { resource: ResourceContent },
}

/// Resource content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// Opaque resource URI, unique per call
    pub uri: String,

    /// MIME type
    pub mime_type: String,

    /// Resource text
    pub text: String,
}

/// Result of a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    /// Result content
    pub content: Vec<ContentItem>,
}

impl ToolResult {
    /// Create a result holding a single resource
    pub fn resource(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            content: vec![ContentItem::Resource {
                resource: ResourceContent {
                    uri: uri.into(),
                    mime_type: mime_type.into(),
                    text: text.into(),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoke_deserialize() {
        let json = r#"{"type":"invoke","name":"process_financial_data","requestId":"r1","params":{"user_intent":"pie"}}"#;
        let req: InvokeEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind, INVOKE);
        assert_eq!(req.name, Some(json!("process_financial_data")));
        assert_eq!(req.request_id, Some(RequestId::from("r1")));
        assert_eq!(req.params["user_intent"], "pie");
    }

    #[test]
    fn test_invoke_missing_params_is_empty_object() {
        let req: InvokeEnvelope =
            serde_json::from_str(r#"{"type":"invoke","name":"x","requestId":7}"#).unwrap();
        assert_eq!(req.params, json!({}));
        assert_eq!(req.request_id, Some(RequestId::from(json!(7))));

        let req: InvokeEnvelope =
            serde_json::from_str(r#"{"type":"invoke","params":null}"#).unwrap();
        assert_eq!(req.params, json!({}));
        assert!(req.name.is_none());
    }

    #[test]
    fn test_invoke_accepts_any_field_types() {
        let req: InvokeEnvelope = serde_json::from_value(
            json!({"type": "invoke", "name": 5, "requestId": 1.5, "params": {}}),
        )
        .unwrap();
        assert_eq!(req.name, Some(json!(5)));
        assert_eq!(req.request_id, Some(RequestId::from(json!(1.5))));

        let req: InvokeEnvelope =
            serde_json::from_value(json!({"type": "invoke", "requestId": true})).unwrap();
        assert_eq!(req.request_id, Some(RequestId::from(json!(true))));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None), "None");
        assert_eq!(describe(Some(&Value::Null)), "None");
        assert_eq!(describe(Some(&json!("subscribe"))), "subscribe");
        assert_eq!(describe(Some(&json!(5))), "5");
        assert_eq!(describe(Some(&json!(["a"]))), r#"["a"]"#);
    }

    #[test]
    fn test_error_envelope_without_request_id() {
        let value = serde_json::to_value(ResponseEnvelope::error(None, "boom")).unwrap();
        assert_eq!(value, json!({"type": "error", "error": "boom"}));
    }

    #[test]
    fn test_result_envelope_shape() {
        let envelope = ResponseEnvelope::result(
            Some(RequestId::from("r1")),
            ToolResult::resource("visualization-1", "text/html", "<p/>"),
        );
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "result",
                "requestId": "r1",
                "result": {"content": [{
                    "type": "resource",
                    "resource": {"uri": "visualization-1", "mimeType": "text/html", "text": "<p/>"}
                }]}
            })
        );
    }

    #[test]
    fn test_stream_events() {
        let ping = serde_json::to_string(&StreamEvent::Ping).unwrap();
        assert_eq!(ping, r#"{"type":"ping"}"#);

        let init = StreamEvent::init(vec![ToolSchema {
            name: "t".to_string(),
            description: "d".to_string(),
            parameters: json!({"type": "object"}),
        }]);
        let value = serde_json::to_value(init).unwrap();
        assert_eq!(
            value,
            json!({"type": "init", "tools": {"t": {"description": "d", "parameters": {"type": "object"}}}})
        );
    }
}
