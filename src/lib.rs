//! Structure Processor MCP Server Library
//!
//! Exposes a financial data formatter as a tool over a Server-Sent Events
//! protocol. The tool asks an LLM provider to render a fixed financial data
//! sample as a standalone HTML visualization.

pub mod config;
pub mod error;
pub mod formatter;
pub mod llm;
pub mod mcp;

pub use config::Config;
pub use error::{ProcessorError, Result};
