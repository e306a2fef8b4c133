/// LLM Client: the single point of entry for all AI gateway calls in the suite.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Workflows depend on the `AiGateway` trait; `LlmClient` is the production backend.
///
/// Calls are never retried. A failed call is terminal for that attempt and the
/// user re-triggers the action.
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all gateway calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway capability
// ────────────────────────────────────────────────────────────────────────────

/// What a chat call may hand back: a bare string, a `{message: {content}}`
/// wrapper, or some other JSON value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GatewayReply {
    Text(String),
    Wrapped { message: WrappedMessage },
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WrappedMessage {
    pub content: Option<String>,
}

impl GatewayReply {
    /// Flattens the reply into the text the extractor and the views work with.
    /// A wrapper without content falls back to the JSON of the whole reply.
    pub fn into_text(self) -> String {
        match self {
            GatewayReply::Text(text) => text,
            GatewayReply::Wrapped {
                message: WrappedMessage {
                    content: Some(content),
                },
            } if !content.is_empty() => content,
            GatewayReply::Wrapped { message } => {
                serde_json::json!({ "message": { "content": message.content } }).to_string()
            }
            GatewayReply::Other(value) => value.to_string(),
        }
    }
}

impl From<String> for GatewayReply {
    fn from(text: String) -> Self {
        GatewayReply::Text(text)
    }
}

/// The external AI chat/OCR capability. Every workflow talks to the gateway
/// through this trait, carried in `AppState` as `Arc<dyn AiGateway>`.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Sends a natural-language prompt and returns the unstructured reply.
    async fn chat(&self, prompt: &str) -> Result<GatewayReply, LlmError>;

    /// Reads the text out of an image (OCR). May return an empty string.
    async fn image_to_text(&self, image: &[u8], media_type: &str) -> Result<String, LlmError>;

    /// Whether the gateway has what it needs to accept calls.
    fn is_ready(&self) -> bool {
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic Messages API backend
// ────────────────────────────────────────────────────────────────────────────

const OCR_INSTRUCTION: &str = "Transcribe all readable text in this image exactly as written. \
    Preserve line breaks. Return only the transcribed text with no commentary. \
    If the image contains no readable text, return an empty response.";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Concatenates every text block of the response.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production gateway backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            api_url,
        }
    }

    /// Makes a single call to the Messages API with the given content parts.
    async fn call(&self, content: Vec<ContentPart<'_>>) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl AiGateway for LlmClient {
    fn is_ready(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn chat(&self, prompt: &str) -> Result<GatewayReply, LlmError> {
        let response = self.call(vec![ContentPart::Text { text: prompt }]).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(GatewayReply::Text(text))
    }

    async fn image_to_text(&self, image: &[u8], media_type: &str) -> Result<String, LlmError> {
        let response = self
            .call(vec![
                ContentPart::Image {
                    source: ImageSource {
                        source_type: "base64",
                        media_type,
                        data: B64.encode(image),
                    },
                },
                ContentPart::Text {
                    text: OCR_INSTRUCTION,
                },
            ])
            .await?;
        // No text block means nothing was read; callers treat that as a soft failure.
        Ok(response.text().unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scripted gateway for tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A gateway that replays queued replies and records every prompt it saw.
    #[derive(Default)]
    pub struct ScriptedGateway {
        chat_replies: Mutex<VecDeque<Result<GatewayReply, String>>>,
        ocr_replies: Mutex<VecDeque<Result<String, String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.push_chat(Ok(text.to_string().into()));
            self
        }

        pub fn reply_with(self, reply: GatewayReply) -> Self {
            self.push_chat(Ok(reply));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.push_chat(Err(message.to_string()));
            self
        }

        pub fn ocr(self, text: &str) -> Self {
            self.ocr_replies
                .lock()
                .unwrap()
                .push_back(Ok(text.to_string()));
            self
        }

        pub fn ocr_fail(self, message: &str) -> Self {
            self.ocr_replies
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn push_chat(&self, reply: Result<GatewayReply, String>) {
            self.chat_replies.lock().unwrap().push_back(reply);
        }
    }

    #[async_trait]
    impl AiGateway for ScriptedGateway {
        async fn chat(&self, prompt: &str) -> Result<GatewayReply, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let next = self.chat_replies.lock().unwrap().pop_front();
            match next {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 503,
                    message,
                }),
                None => Err(LlmError::EmptyContent),
            }
        }

        async fn image_to_text(&self, _image: &[u8], _media_type: &str) -> Result<String, LlmError> {
            let next = self.ocr_replies.lock().unwrap().pop_front();
            match next {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(LlmError::Api {
                    status: 503,
                    message,
                }),
                None => Ok(String::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_from_bare_string() {
        let reply: GatewayReply = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(reply.into_text(), "hello");
    }

    #[test]
    fn test_reply_from_wrapped_message() {
        let reply: GatewayReply =
            serde_json::from_str(r#"{"message": {"content": "{\"a\": 1}"}}"#).unwrap();
        assert_eq!(reply.into_text(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_wrapped_message_without_content_falls_back_to_json() {
        let reply: GatewayReply = serde_json::from_str(r#"{"message": {}}"#).unwrap();
        assert_eq!(reply.into_text(), r#"{"message":{"content":null}}"#);
    }

    #[test]
    fn test_unknown_reply_shape_is_serialized() {
        let reply: GatewayReply = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert!(matches!(reply, GatewayReply::Other(_)));
        assert_eq!(reply.into_text(), r#"{"text":"x"}"#);
    }

    #[test]
    fn test_response_text_concatenates_text_blocks() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "text", "text": "part one "},
                {"type": "tool_use"},
                {"type": "text", "text": "part two"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("part one part two"));
    }

    #[test]
    fn test_response_without_text_blocks() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [],
            "usage": {"input_tokens": 1, "output_tokens": 0}
        }))
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_image_request_serializes_base64_block() {
        let part = ContentPart::Image {
            source: ImageSource {
                source_type: "base64",
                media_type: "image/png",
                data: B64.encode([1u8, 2, 3]),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["source"]["type"], "base64");
        assert_eq!(json["source"]["media_type"], "image/png");
        assert_eq!(json["source"]["data"], "AQID");
    }
}
