//! MCP (Model Context Protocol) module
//!
//! Implements the SSE tool protocol: catalog announcement and tool invocation.

pub mod server;
pub mod tools;
pub mod types;
