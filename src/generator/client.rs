use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{prompt, StoryGenerator};
use crate::config::GenerationConfig;

/// Blocking chat-completions client. The request runs on the UI thread and
/// blocks until the service answers or the timeout fires.
pub struct OpenAiGenerator {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiGenerator {
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .with_context(|| format!("set {} to use story generation", config.api_key_env))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn build_request_body(&self, theme: &str, count: usize) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "messages": [{
                "role": "user",
                "content": prompt::build_prompt(theme, count),
            }],
        })
    }
}

impl StoryGenerator for OpenAiGenerator {
    fn generate(&self, theme: &str, count: usize) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(theme, count))
            .send()
            .context("story generation request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("generation service returned {}: {}", status, body));
        }

        let completion: ChatCompletion = response
            .json()
            .context("malformed response from generation service")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("generation service returned no choices"))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiGenerator {
        OpenAiGenerator {
            http: Client::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key: "test-key".to_string(),
            max_tokens: 500,
            temperature: 0.2,
        }
    }

    #[test]
    fn request_body_carries_model_and_prompt() {
        let body = test_client().build_request_body("Winter", 3);

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "user");
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("theme of Winter"));
        assert!(content.contains("3 placeholders"));
    }

    #[test]
    fn completion_response_parses() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"A [Noun1]."}}]}"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.choices[0].message.content, "A [Noun1].");
    }
}
