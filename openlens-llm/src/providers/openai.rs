use crate::config::{ChatRequest, ChatResponse, Usage};
use crate::error::{LLMError, Result};
use reqwest::Client;
use serde_json::json;

pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    /// One chat completion round-trip. No retries; callers decide how to
    /// surface failures.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        // Refuse plaintext endpoints before anything leaves the process
        if !self.base_url.starts_with("https://") {
            return Err(LLMError::InvalidResponse("Invalid base URL".to_string()));
        }

        let body = json!({
            "model": request.model,
            "messages": request.messages.iter().map(|m| {
                json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            }).collect::<Vec<_>>(),
            "temperature": request.temperature.clamp(0.0, 2.0),
            "max_tokens": request.max_tokens.min(4096),
        });

        // Never log the full key
        let api_key_prefix = if self.api_key.len() > 8 {
            &self.api_key[..8]
        } else {
            "***"
        };
        tracing::debug!("Making request to OpenAI with key {}...", api_key_prefix);

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(std::time::Duration::from_secs(120))
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimit);
        }

        if status == 401 || status == 403 {
            return Err(LLMError::AuthenticationFailed);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Limit error message size
            let error_msg = if text.len() > 500 {
                format!("HTTP {}: {}", status, &text[..500])
            } else {
                format!("HTTP {}: {}", status, text)
            };
            return Err(LLMError::InvalidResponse(error_msg));
        }

        let json: serde_json::Value = response.json().await?;

        let choices = json.get("choices").and_then(|c| c.as_array()).ok_or_else(|| {
            LLMError::InvalidResponse("Invalid response format: no choices array".to_string())
        })?;

        if choices.is_empty() {
            return Err(LLMError::InvalidResponse("No choices in response".to_string()));
        }

        let choice = &choices[0];
        let content = choice["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        let usage = json.get("usage").and_then(|u| {
            Some(Usage {
                prompt_tokens: u["prompt_tokens"].as_u64()? as u32,
                completion_tokens: u["completion_tokens"].as_u64()? as u32,
                total_tokens: u["total_tokens"].as_u64()? as u32,
            })
        });

        Ok(ChatResponse {
            content,
            model: json["model"].as_str().unwrap_or(&request.model).to_string(),
            usage,
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
        })
    }
}
