//! Error types for the Structure Processor MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

use crate::llm::types::Provider;

/// Main error type for the Structure Processor MCP Server
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProcessorError {
    /// Text reported to clients in an error envelope, without the category prefix
    pub fn client_message(&self) -> String {
        match self {
            ProcessorError::Llm(e) => e.to_string(),
            ProcessorError::Mcp(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// LLM provider errors
///
/// The display text of each variant is exactly what the formatter tool hands
/// back to clients as resource text when a provider call degrades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The provider's API key is not set (upstream credential missing)
    #[error("{provider} API key not provided")]
    MissingApiKey { provider: Provider },

    #[error("{provider} API error: {message}")]
    RequestFailed { provider: Provider, message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid listen address: {address}")]
    InvalidAddress { address: String },

    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// MCP protocol errors
///
/// Display text is the literal `error` field of the error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Unknown request type: {kind}")]
    UnknownRequestType { kind: String },

    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("{message}")]
    InvalidEnvelope { message: String },
}

/// Result type alias for Structure Processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;
