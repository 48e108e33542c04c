//! Bedrock model families and their request and response shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

const MAX_TOKENS: u32 = 1000;
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Language models the digest can be generated with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelProvider {
    /// Anthropic Claude 3 Sonnet.
    #[default]
    Claude3,
    /// Meta Llama 2 70B chat.
    Llama2,
    /// AI21 Labs Jurassic-2 Ultra.
    Jurassic2,
}

impl ModelProvider {
    /// Every provider, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Claude3, Self::Llama2, Self::Jurassic2];

    /// Name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Claude3 => "claude3",
            Self::Llama2 => "llama2",
            Self::Jurassic2 => "jurassic2",
        }
    }

    /// Bedrock model identifier.
    #[must_use]
    pub const fn model_id(self) -> &'static str {
        match self {
            Self::Claude3 => "anthropic.claude-3-sonnet-20240229-v1:0",
            Self::Llama2 => "meta.llama2-70b-chat-v1",
            Self::Jurassic2 => "ai21.j2-ultra-v1",
        }
    }

    /// Builds the provider-specific request body for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Parse`] if the body cannot be serialised.
    pub fn request_body(self, prompt: &str) -> Result<serde_json::Value, DigestError> {
        let body = match self {
            Self::Claude3 => serde_json::to_value(ClaudeRequest {
                anthropic_version: ANTHROPIC_VERSION,
                max_tokens: MAX_TOKENS,
                temperature: 0.5,
                messages: vec![ClaudeMessage {
                    role: "user",
                    content: vec![ClaudeContentBlock {
                        kind: "text",
                        text: prompt,
                    }],
                }],
            }),
            Self::Llama2 => serde_json::to_value(LlamaRequest {
                prompt,
                temperature: 0.3,
                top_p: 0.3,
                max_gen_len: MAX_TOKENS,
            }),
            Self::Jurassic2 => serde_json::to_value(JurassicRequest {
                prompt,
                temperature: 0.5,
                max_tokens: MAX_TOKENS,
            }),
        };
        body.map_err(|error| DigestError::Parse {
            message: format!("failed to encode {} request: {error}", self.name()),
        })
    }

    /// Extracts the completion text from a provider response body.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Parse`] when the body does not match the
    /// provider's response shape and [`DigestError::Model`] when it carries
    /// no text.
    pub fn parse_completion(self, body: &str) -> Result<String, DigestError> {
        let decode_error = |error: serde_json::Error| DigestError::Parse {
            message: format!("unexpected {} response: {error}", self.name()),
        };

        let completion = match self {
            Self::Claude3 => {
                let response: ClaudeResponse = serde_json::from_str(body).map_err(decode_error)?;
                response
                    .content
                    .into_iter()
                    .find_map(|block| block.text)
            }
            Self::Llama2 => {
                let response: LlamaResponse = serde_json::from_str(body).map_err(decode_error)?;
                Some(response.generation)
            }
            Self::Jurassic2 => {
                let response: JurassicResponse =
                    serde_json::from_str(body).map_err(decode_error)?;
                response
                    .completions
                    .into_iter()
                    .next()
                    .map(|completion| completion.data.text)
            }
        };

        completion
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| DigestError::Model {
                message: format!("{} returned an empty completion", self.name()),
            })
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for ModelProvider {
    type Err = DigestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|provider| provider.name()).collect();
                DigestError::Configuration {
                    message: format!(
                        "unknown model '{wanted}' (expected one of: {})",
                        valid.join(", ")
                    ),
                }
            })
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: Vec<ClaudeContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ClaudeContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct LlamaRequest<'a> {
    prompt: &'a str,
    temperature: f64,
    top_p: f64,
    max_gen_len: u32,
}

#[derive(Debug, Serialize)]
struct JurassicRequest<'a> {
    prompt: &'a str,
    temperature: f64,
    #[serde(rename = "maxTokens")]
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponseBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LlamaResponse {
    generation: String,
}

#[derive(Debug, Deserialize)]
struct JurassicResponse {
    completions: Vec<JurassicCompletion>,
}

#[derive(Debug, Deserialize)]
struct JurassicCompletion {
    data: JurassicCompletionData,
}

#[derive(Debug, Deserialize)]
struct JurassicCompletionData {
    text: String,
}
