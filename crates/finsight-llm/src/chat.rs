//! Blocking chat-completion client.

use finsight_core::config::LlmConfig;
use finsight_core::errors::{FinsightResult, RemoteError};
use finsight_core::traits::{Completion, GenerationOptions, ILanguageModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SERVICE: &str = "llm";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct SamplingOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    #[serde(default)]
    prompt_eval_count: Option<u64>,
    #[serde(default)]
    eval_count: Option<u64>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// HTTP chat-model client.
pub struct ChatModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl ChatModel {
    pub fn new(config: &LlmConfig) -> Self {
        info!(endpoint = %config.endpoint, model = %config.model, "chat model initialized");
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

impl ILanguageModel for ChatModel {
    fn generate(
        &self,
        system: &str,
        user: &str,
        options: &GenerationOptions,
    ) -> FinsightResult<Completion> {
        let url = format!("{}/api/chat", self.endpoint);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            options: SamplingOptions {
                temperature: options.temperature,
                top_p: options.top_p,
                num_predict: options.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RemoteError::bad_response(
                SERVICE,
                format!("HTTP {status}: {}", body.trim()),
            )
            .into());
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| RemoteError::bad_response(SERVICE, e))?;

        debug!(
            chars = parsed.message.content.len(),
            tokens_in = ?parsed.prompt_eval_count,
            tokens_out = ?parsed.eval_count,
            "generation complete"
        );

        Ok(Completion {
            text: parsed.message.content,
            input_tokens: parsed.prompt_eval_count,
            output_tokens: parsed.eval_count,
        })
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape_is_stable() {
        let request = ChatRequest {
            model: "llama3.1",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "be factual",
                },
                ChatMessage {
                    role: "user",
                    content: "what changed?",
                },
            ],
            stream: false,
            options: SamplingOptions {
                temperature: 0.0,
                top_p: 1.0,
                num_predict: 80,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["options"]["num_predict"], 80);
    }

    #[test]
    fn response_parses_without_usage_counters() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"message":{"content":"hi"}}"#).unwrap();
        assert_eq!(parsed.message.content, "hi");
        assert_eq!(parsed.prompt_eval_count, None);
    }

    #[test]
    fn response_parses_usage_counters() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"message":{"content":"hi"},"prompt_eval_count":12,"eval_count":34}"#,
        )
        .unwrap();
        assert_eq!(parsed.prompt_eval_count, Some(12));
        assert_eq!(parsed.eval_count, Some(34));
    }
}
