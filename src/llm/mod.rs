//! LLM provider module
//!
//! Contains provider types, the HTTP client and output helpers.

pub mod client;
pub mod types;
pub mod utils;
