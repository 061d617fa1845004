//! Financial data formatter tool
//!
//! Turns a fixed financial data sample into a standalone HTML visualization
//! by asking an LLM to write the document.

pub mod prompt;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::ProviderCredentials;
use crate::error::{McpError, ProcessorError, Result};
use crate::llm::client::{resolve_provider, LlmClient};
use crate::llm::types::Provider;
use crate::llm::utils::strip_code_fence;
use crate::mcp::types::{describe, ToolResult};

use self::prompt::{build_prompt, SAMPLE_FINANCIAL_DATA};

/// Tool name
pub const TOOL_NAME: &str = "process_financial_data";

/// Tool description
pub const TOOL_DESCRIPTION: &str = "Fetch and format financial data in one step";

/// MIME type of the produced resource
pub const HTML_MIME_TYPE: &str = "text/html";

/// Prefix of the per-call resource URI
pub const URI_PREFIX: &str = "visualization-";

/// Tool arguments, each rendered to text.
///
/// Absent fields take their defaults; present values of any JSON type are
/// accepted and rendered with [`describe`], so `null` reads as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    user_intent: String,
    model: String,
    provider: String,
}

impl Args {
    fn from_params(params: &Value) -> std::result::Result<Self, McpError> {
        let fields = params
            .as_object()
            .ok_or_else(|| McpError::InvalidArguments {
                message: format!("params must be an object, got {}", params),
            })?;

        let field = |key: &str, default: &str| match fields.get(key) {
            Some(value) => describe(Some(value)),
            None => default.to_string(),
        };

        Ok(Self {
            user_intent: field("user_intent", ""),
            model: field("model", Provider::Google.default_model()),
            provider: field("provider", Provider::Google.name()),
        })
    }
}

/// Produce an HTML visualization of the sample data for a user intent.
///
/// Provider failures (a missing API key or a failed request) do not fail the
/// call: their message becomes the resource text of a successful result.
/// Clients have to inspect the text to notice.
pub async fn process_financial_data(
    llm: &LlmClient,
    credentials: &ProviderCredentials,
    params: Value,
) -> Result<ToolResult> {
    let args = Args::from_params(&params).map_err(ProcessorError::Mcp)?;

    let (provider, model) = resolve_provider(&args.provider, &args.model);
    let prompt = build_prompt(&args.user_intent, SAMPLE_FINANCIAL_DATA);

    let raw = match llm.call(credentials, provider, &prompt, &model).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                %provider,
                error = %e,
                "Provider call failed; returning the error text as the visualization"
            );
            e.to_string()
        }
    };

    let html = strip_code_fence(&raw);
    let uri = format!("{}{}", URI_PREFIX, Uuid::new_v4());

    Ok(ToolResult::resource(uri, HTML_MIME_TYPE, html))
}

/// Parameter schema advertised for the tool
pub fn parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "user_intent": {
                "type": "string",
                "description": "User's intention or preference for how to display the data (e.g., 'show as chart', 'analyze trends', 'compare values')"
            },
            "model": {
                "type": "string",
                "description": "LLM model to use for processing"
            },
            "provider": {
                "type": "string",
                "enum": ["google", "anthropic", "openai", "groq"],
                "description": "LLM provider to use"
            }
        },
        "required": ["user_intent"]
    })
}
