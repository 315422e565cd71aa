//! OpenAI-compatible AI adapter.
//!
//! Works with Google's `/v1beta/openai` endpoint, OpenAI, DeepSeek and any
//! provider using the chat completions API format.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use tewuwuq_core::ports::AiPort;
use tewuwuq_types::{
    ChatError, Result,
    ai::{
        format_transcript, AiReply, AnalysisRequest, HistoryPart, HistoryRole, HistoryTurn,
        InlineFile, RespondRequest,
    },
    config::AiConfig,
};

use super::prompts::{respond_system_prompt, ANALYSIS_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT};

/// Provider that speaks the OpenAI chat completions protocol.
pub struct OpenAiCompatProvider {
    config: AiConfig,
    base_url: String,
}

impl OpenAiCompatProvider {
    pub fn new(config: AiConfig) -> Self {
        let base_url = config
            .api_base
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(config.provider.default_base_url())
            .trim_end_matches('/')
            .to_string();
        Self { config, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn build_request_body(&self, messages: Vec<Value>, json_reply: bool) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });
        if json_reply {
            body["response_format"] = json!({ "type": "json_object" });
        }
        body
    }

    /// Run one completion, giving up after `request_timeout_ms`.
    async fn complete(&self, messages: Vec<Value>, json_reply: bool) -> Result<String> {
        let body = self.build_request_body(messages, json_reply);
        let timeout_ms = self.config.request_timeout_ms;
        let timer = TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX));

        match future::select(Box::pin(self.post(body)), Box::pin(timer)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ChatError::Timeout(timeout_ms)),
        }
    }

    async fn post(&self, body: Value) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Ai(format!("HTTP {}: {}", status, text)));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Ai(e.to_string()))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Ai("No choices in response".to_string()))
    }
}

#[async_trait(?Send)]
impl AiPort for OpenAiCompatProvider {
    async fn respond(&self, req: RespondRequest) -> Result<AiReply> {
        let mut messages = vec![json!({
            "role": "system",
            "content": respond_system_prompt(req.mode),
        })];
        messages.extend(req.history.iter().map(turn_to_json));
        messages.push(current_message_to_json(
            &req.current_message_text,
            req.current_file.as_ref(),
        ));

        let content = self.complete(messages, true).await?;
        parse_reply(&content)
    }

    async fn analyze_session(&self, req: AnalysisRequest) -> Result<String> {
        let prompt = format!(
            "Session title: {}\n\n{}",
            req.session_title,
            format_transcript(&req.messages)
        );
        let messages = vec![
            json!({ "role": "system", "content": ANALYSIS_SYSTEM_PROMPT }),
            json!({ "role": "user", "content": prompt }),
        ];
        self.complete(messages, false).await
    }

    async fn summarize(&self, transcript: &str) -> Result<String> {
        let messages = vec![
            json!({ "role": "system", "content": SUMMARY_SYSTEM_PROMPT }),
            json!({ "role": "user", "content": transcript }),
        ];
        self.complete(messages, false).await
    }

    fn provider_name(&self) -> &str {
        self.config.provider.label()
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

// ─── Serialization helpers ───────────────────────────────────

pub(crate) fn turn_to_json(turn: &HistoryTurn) -> Value {
    match turn.role {
        // Assistant content must be a plain string
        HistoryRole::Model => {
            let text = turn
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("\n");
            json!({ "role": "assistant", "content": text })
        }
        HistoryRole::User => {
            let parts: Vec<Value> = turn.parts.iter().filter_map(part_to_json).collect();
            json!({ "role": "user", "content": parts })
        }
    }
}

fn part_to_json(part: &HistoryPart) -> Option<Value> {
    if let Some(ref text) = part.text {
        return Some(json!({ "type": "text", "text": text }));
    }
    part.media.as_ref().map(|media| {
        let content_type = media
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        media_to_json(&media.url, content_type, media.name.as_deref().unwrap_or("attachment"))
    })
}

/// Images become `image_url` parts; anything else is a `file` part carrying
/// the data URI.
fn media_to_json(data_uri: &str, content_type: &str, name: &str) -> Value {
    if content_type.starts_with("image/") {
        json!({ "type": "image_url", "image_url": { "url": data_uri } })
    } else {
        json!({
            "type": "file",
            "file": { "filename": name, "file_data": data_uri },
        })
    }
}

pub(crate) fn current_message_to_json(text: &str, file: Option<&InlineFile>) -> Value {
    let mut parts = Vec::new();
    if !text.trim().is_empty() {
        parts.push(json!({ "type": "text", "text": text }));
    }
    if let Some(file) = file {
        parts.push(media_to_json(&file.data_uri, &file.mime_type, &file.name));
    }
    json!({ "role": "user", "content": parts })
}

/// Decode the model's JSON reply. Models occasionally wrap it in a code
/// fence or ignore the format entirely; plain text is taken as the answer.
pub(crate) fn parse_reply(content: &str) -> Result<AiReply> {
    let trimmed = strip_code_fence(content.trim());

    match serde_json::from_str::<AiReply>(trimmed) {
        Ok(reply) if !reply.amharic_response.trim().is_empty() => Ok(reply),
        Ok(_) => Err(ChatError::Ai("AI did not return a response".to_string())),
        Err(e) if !trimmed.is_empty() => {
            log::warn!("Reply was not the expected JSON ({}), using raw text", e);
            Ok(AiReply {
                amharic_response: trimmed.to_string(),
                reasoning: None,
            })
        }
        Err(_) => Err(ChatError::Ai("AI did not return a response".to_string())),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
