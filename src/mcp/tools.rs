//! MCP Tool definitions and handlers
//!
//! The tool registry is a closed set of [`ToolId`]s. Schemas and handlers are
//! matched exhaustively, so adding a tool without wiring it fails to compile.

use std::sync::Arc;

use serde_json::Value;

use crate::config::CredentialSource;
use crate::error::{McpError, Result};
use crate::formatter;
use crate::llm::client::LlmClient;
use crate::mcp::types::{ToolResult, ToolSchema};

/// Registered tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    ProcessFinancialData,
}

impl ToolId {
    /// Every registered tool
    pub const ALL: [ToolId; 1] = [ToolId::ProcessFinancialData];

    /// Look up a tool by its exact, case-sensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Wire name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            ToolId::ProcessFinancialData => formatter::TOOL_NAME,
        }
    }

    /// Advertised schema of the tool
    pub fn schema(&self) -> ToolSchema {
        match self {
            ToolId::ProcessFinancialData => ToolSchema {
                name: self.name().to_string(),
                description: formatter::TOOL_DESCRIPTION.to_string(),
                parameters: formatter::parameters_schema(),
            },
        }
    }
}

/// Tool handler
pub struct ToolHandler {
    llm: LlmClient,
    credentials: Arc<dyn CredentialSource>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(llm: LlmClient, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { llm, credentials }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<ToolSchema> {
        ToolId::ALL.iter().map(ToolId::schema).collect()
    }

    /// Resolve a tool name against the registry
    pub fn resolve(&self, name: &str) -> std::result::Result<ToolId, McpError> {
        ToolId::from_name(name).ok_or_else(|| McpError::UnknownTool {
            name: name.to_string(),
        })
    }

    /// Call a tool. Credentials are resolved once for the invocation.
    pub async fn call_tool(&self, tool: ToolId, params: Value) -> Result<ToolResult> {
        let credentials = self.credentials.resolve();

        match tool {
            ToolId::ProcessFinancialData => {
                formatter::process_financial_data(&self.llm, &credentials, params).await
            }
        }
    }
}
