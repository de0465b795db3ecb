//! Ollama chat client
//!
//! One round trip per request against the `/api/chat` endpoint, non-streaming,
//! awaited to completion before the next issue is processed. There is no retry
//! policy: each issue gets exactly one attempt, and a failed attempt is
//! recovered upstream as a placeholder fix.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Default Ollama endpoint, overridable with `--host` or `OLLAMA_HOST`.
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default model, overridable with `--model` or `LINTMEND_MODEL`.
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<Message>,
}

/// A model that can suggest a fix for a prompt.
///
/// The chat service is a capability boundary: the engine only needs "given a
/// prompt, produce a suggestion", so tests swap in a canned implementation
/// without any network.
pub trait SuggestionSource {
    fn suggest(
        &self,
        system: &str,
        user: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<String>> + Send;
}

pub struct ChatClient {
    host: String,
    model: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl SuggestionSource for ChatClient {
    async fn suggest(&self, system: &str, user: &str) -> anyhow::Result<String> {
        let url = format!("{}/api/chat", self.host.trim_end_matches('/'));
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(anyhow!(
                "Ollama error {}: {}",
                status,
                truncate_str(&text, 200)
            ));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("failed to parse Ollama response: {}\n{}", e, truncate_str(&text, 200)))?;

        match parsed.message {
            Some(message) if !message.content.trim().is_empty() => Ok(message.content),
            _ => Err(anyhow!("model reply contained no text content")),
        }
    }
}

/// Truncate a string for display (Unicode-safe).
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> &str {
    if s.chars().count() <= max_chars {
        s
    } else {
        let byte_idx = s
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        &s[..byte_idx]
    }
}
