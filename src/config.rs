//! Configuration management for the Structure Processor MCP Server
//!
//! Handles the listen address, stream timing, provider endpoints and
//! provider credentials.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::error::{ConfigError, ProcessorError, Result};
use crate::llm::types::Provider;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 3003;

/// Seconds between `ping` events on an open stream
pub const DEFAULT_PING_INTERVAL_SECS: u64 = 30;

/// Seconds before an outbound provider request is abandoned
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Structure Processor MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind the HTTP server to
    pub host: String,

    /// Port to bind the HTTP server to
    pub port: u16,

    /// Interval between keep-alive pings on the event stream
    pub ping_interval: Duration,

    /// Timeout applied to every outbound provider request
    pub request_timeout: Duration,

    /// Provider API base URLs
    pub endpoints: ProviderEndpoints,
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ping_interval: Duration::from_secs(DEFAULT_PING_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            endpoints: ProviderEndpoints::default(),
        }
    }

    /// Override the listen address
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Resolve the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(ProcessorError::Config(ConfigError::InvalidAddress { address }))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Base URLs for each provider's API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub google: String,
    pub anthropic: String,
    pub openai: String,
    pub groq: String,
}

impl ProviderEndpoints {
    /// Point every provider at the same base URL (used by tests with a mock server)
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            google: base_url.clone(),
            anthropic: base_url.clone(),
            openai: base_url.clone(),
            groq: base_url,
        }
    }

    /// Base URL for a provider
    pub fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::Google => &self.google,
            Provider::Anthropic => &self.anthropic,
            Provider::OpenAi => &self.openai,
            Provider::Groq => &self.groq,
        }
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            google: endpoints::GOOGLE.to_string(),
            anthropic: endpoints::ANTHROPIC.to_string(),
            openai: endpoints::OPENAI.to_string(),
            groq: endpoints::GROQ.to_string(),
        }
    }
}

/// Snapshot of provider API keys for a single invocation
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub google: Option<String>,
    pub anthropic: Option<String>,
    pub openai: Option<String>,
    pub groq: Option<String>,
}

impl ProviderCredentials {
    /// API key for a provider; empty keys count as missing
    pub fn api_key(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::Google => &self.google,
            Provider::Anthropic => &self.anthropic,
            Provider::OpenAi => &self.openai,
            Provider::Groq => &self.groq,
        };
        key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Source of provider credentials, consulted once per tool invocation
pub trait CredentialSource: Send + Sync {
    fn resolve(&self) -> ProviderCredentials;
}

/// Reads provider keys from the process environment at call time
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn resolve(&self) -> ProviderCredentials {
        let var = |provider: Provider| std::env::var(provider.api_key_var()).ok();
        ProviderCredentials {
            google: var(Provider::Google),
            anthropic: var(Provider::Anthropic),
            openai: var(Provider::OpenAi),
            groq: var(Provider::Groq),
        }
    }
}

/// Fixed credentials, independent of the environment
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub ProviderCredentials);

impl CredentialSource for StaticCredentials {
    fn resolve(&self) -> ProviderCredentials {
        self.0.clone()
    }
}

/// Provider API base URLs
pub mod endpoints {
    pub const GOOGLE: &str = "https://generativelanguage.googleapis.com";
    pub const ANTHROPIC: &str = "https://api.anthropic.com";
    pub const OPENAI: &str = "https://api.openai.com";
    pub const GROQ: &str = "https://api.groq.com/openai";
}
