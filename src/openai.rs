//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
///
/// The API key is taken from `api_key` when provided, otherwise from the
/// `OPENAI_API_KEY` environment variable. Uses a 5-minute timeout by
/// default to prevent hung API calls.
pub fn create_client(api_key: Option<&str>) -> Client<OpenAIConfig> {
    create_client_with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(
    api_key: Option<&str>,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = match api_key {
        Some(key) if !key.is_empty() => OpenAIConfig::default().with_api_key(key),
        _ => OpenAIConfig::default(),
    };

    Client::with_config(config).with_http_client(http_client)
}
