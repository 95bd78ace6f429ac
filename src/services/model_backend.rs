use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::{LlmProvider, Settings};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("model request failed: {0}")]
    Transport(String),
    #[error("model backend returned HTTP {0}")]
    HttpStatus(u16),
    #[error("model backend returned no content")]
    EmptyResponse,
}

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenaiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenaiClient {
            client: Client::with_config(config),
            model,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| BackendError::Transport(e.to_string()))?
                .into()])
            .max_tokens(1000_u32)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(BackendError::EmptyResponse)
    }
}

pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(client: reqwest::Client, endpoint: String, model: String) -> Self {
        OllamaClient {
            client,
            endpoint,
            model,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.endpoint.trim_end_matches('/'));
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let res = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            return Err(BackendError::HttpStatus(res.status().as_u16()));
        }

        let body: OllamaResponse = res
            .json()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(body.response.trim().to_string())
    }
}

/// The one call contract both model providers are used through:
/// `generate(prompt) -> text`. The variant is fixed at startup from
/// configuration.
pub enum ModelBackend {
    Openai(OpenaiClient),
    Ollama(OllamaClient),
}

impl ModelBackend {
    pub fn from_settings(settings: &Settings, http_client: reqwest::Client) -> Self {
        match settings.llm.provider {
            LlmProvider::Openai => ModelBackend::Openai(OpenaiClient::new(
                settings.api_keys.openai.clone(),
                settings.llm.openai_model.clone(),
            )),
            LlmProvider::Ollama => ModelBackend::Ollama(OllamaClient::new(
                http_client,
                settings.llm.ollama_endpoint.clone(),
                settings.llm.ollama_model.clone(),
            )),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        match self {
            ModelBackend::Openai(client) => client.generate(prompt).await,
            ModelBackend::Ollama(client) => client.generate(prompt).await,
        }
    }

    /// Provenance stamped onto every extracted record.
    pub fn model_name(&self) -> &str {
        match self {
            ModelBackend::Openai(client) => &client.model,
            ModelBackend::Ollama(client) => &client.model,
        }
    }
}
