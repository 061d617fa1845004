//! LLM provider type definitions
//!
//! Provider identities and the request bodies sent to each provider's API.

use std::fmt;

use serde::Serialize;

/// Token ceiling sent with every completion request
pub const MAX_TOKENS: u32 = 4000;

/// System message used by the chat-completions style providers
pub const SYSTEM_PROMPT: &str = "You analyze and format structures.";

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    Anthropic,
    OpenAi,
    Groq,
}

impl Provider {
    /// All providers, in the order they are advertised
    pub const ALL: [Provider; 4] = [
        Provider::Google,
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::Groq,
    ];

    /// Parse a provider from its wire name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "google" => Some(Provider::Google),
            "anthropic" => Some(Provider::Anthropic),
            "openai" => Some(Provider::OpenAi),
            "groq" => Some(Provider::Groq),
            _ => None,
        }
    }

    /// Wire name used in tool parameters
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Groq => "groq",
        }
    }

    /// Model used when the caller does not pick one
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Google => "gemini-1.5-pro",
            Provider::Anthropic => "claude-3-haiku-20240307",
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Groq => "llama3-70b-8192",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }

    /// JSON pointer to the generated text in a successful response
    pub(crate) fn response_text_pointer(&self) -> &'static str {
        match self {
            Provider::Google => "/candidates/0/content/parts/0/text",
            Provider::Anthropic => "/content/0/text",
            Provider::OpenAi | Provider::Groq => "/choices/0/message/content",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provider::Google => "Google",
            Provider::Anthropic => "Anthropic",
            Provider::OpenAi => "OpenAI",
            Provider::Groq => "Groq",
        };
        f.write_str(label)
    }
}

// ==================== Google ====================

/// Google `generateContent` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest<'a> {
    pub contents: Vec<GoogleContent<'a>>,
    pub generation_config: GoogleGenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GoogleContent<'a> {
    pub role: &'a str,
    pub parts: Vec<GooglePart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GooglePart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    pub max_output_tokens: u32,
}

impl<'a> GoogleRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![GoogleContent {
                role: "user",
                parts: vec![GooglePart { text: prompt }],
            }],
            generation_config: GoogleGenerationConfig {
                max_output_tokens: MAX_TOKENS,
            },
        }
    }
}

// ==================== Anthropic / OpenAI / Groq ====================

/// Chat message shared by the Anthropic and chat-completions request shapes
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Anthropic `messages` request
#[derive(Debug, Serialize)]
pub struct AnthropicRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage<'a>>,
}

impl<'a> AnthropicRequest<'a> {
    pub fn new(prompt: &'a str, model: &'a str) -> Self {
        Self {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// OpenAI-compatible `chat/completions` request (OpenAI and Groq)
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(prompt: &'a str, model: &'a str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
        }
    }
}
