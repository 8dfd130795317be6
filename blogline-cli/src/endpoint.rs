use blogline_core::completion::{
    CompletionSettings, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS,
};
use clap::Args;
use url::Url;

/// Where the completion endpoint lives and how to sample from it.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct EndpointArgs {
    /// Base URL of an OpenAI-compatible API, e.g. LM Studio or llama.cpp
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[arg(long, env = "BLOGLINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Seconds to wait for the whole completion
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl Default for EndpointArgs {
    fn default() -> Self {
        CompletionSettings::default().into()
    }
}

impl From<CompletionSettings> for EndpointArgs {
    fn from(settings: CompletionSettings) -> Self {
        Self {
            base_url: settings.base_url,
            model: settings.model,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            api_key: settings.api_key,
            timeout_secs: settings.timeout_secs,
        }
    }
}

impl From<EndpointArgs> for CompletionSettings {
    fn from(args: EndpointArgs) -> Self {
        CompletionSettings::builder()
            .base_url(args.base_url)
            .model(args.model)
            .temperature(args.temperature)
            .max_tokens(args.max_tokens)
            .maybe_api_key(args.api_key)
            .timeout_secs(args.timeout_secs)
            .build()
    }
}
