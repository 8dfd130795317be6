//! Client for OpenAI-compatible text completion endpoints, such as the local
//! server LM Studio exposes on `http://localhost:1234/v1`.

use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const COMPLETIONS_PATH: &str = "completions";

fn default_base_url() -> Url {
    DEFAULT_BASE_URL
        .parse()
        .expect("should be able to parse default URL")
}

/// How to reach the completion endpoint and what to ask it for.
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    #[builder(default = default_base_url())]
    pub base_url: Url,
    #[builder(into, default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[builder(default = 1.0)]
    pub top_p: f64,
    #[builder(default)]
    pub frequency_penalty: f64,
    #[builder(default)]
    pub presence_penalty: f64,
    /// Sent as a bearer token. Local servers usually ignore it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CompletionSettings {
    pub fn completions_url(&self) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(format!("{base}/{COMPLETIONS_PATH}").parse()?)
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub n: u32,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(settings: &'a CompletionSettings, prompt: &'a str) -> Self {
        Self {
            model: &settings.model,
            prompt,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
            frequency_penalty: settings.frequency_penalty,
            presence_penalty: settings.presence_penalty,
            n: 1,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: Url,
    settings: CompletionSettings,
}

impl CompletionClient {
    pub fn new(settings: CompletionSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        let endpoint = settings.completions_url()?;

        Ok(Self {
            http,
            endpoint,
            settings,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends `prompt` and returns the text of the first choice, untouched.
    #[instrument(skip(self, prompt), fields(endpoint = %self.endpoint, model = %self.settings.model))]
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::new(&self.settings, prompt);
        tracing::debug!(prompt_len = prompt.len(), "sending completion request");

        let mut builder = self.http.post(self.endpoint.clone()).json(&request);
        if let Some(api_key) = &self.settings.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "completion endpoint returned an error");
            return Err(Error::Endpoint { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyCompletion)?;

        tracing::debug!(finish_reason = ?choice.finish_reason, "completion received");

        Ok(choice.text)
    }
}
