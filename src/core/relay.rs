//! Email draft relay
//!
//! This module owns the one real operation of the service: turn a
//! note/tone/recipient triple into an instruction prompt, send it to the
//! OpenRouter chat-completion endpoint, and hand back the generated email
//! body. Every failure branch is a named variant of [`UpstreamError`]
//! rather than a caught exception.

use crate::core::config::Config;
use crate::core::constants::{SAMPLING_TEMPERATURE, role};
use crate::models::draft::DraftRequest;
use crate::models::openrouter::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Error types for the upstream completion call
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Provider answered with a non-success HTTP status
    #[error("API error {status}")]
    Api { status: u16, body: String },

    /// Provider answered 2xx but the body did not match the expected
    /// completion envelope
    #[error("Failed to parse JSON: {detail}")]
    Shape { detail: String, raw: String },

    /// The request never completed at the transport level (connect, DNS,
    /// timeout)
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Relay client for the upstream chat-completion provider
///
/// Built once at startup and shared read-only across requests; the only
/// process-wide state is the reqwest `Client` and the bearer credential.
pub struct DraftRelay {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DraftRelay {
    /// Create a new relay from the application configuration
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.openrouter_api_key.clone(),
            base_url: config.openrouter_base_url.clone(),
            model: config.model.clone(),
        }
    }

    /// Generate an email body for the given draft request
    ///
    /// Blocks the handling task until the upstream responds or the client
    /// timeout fires. The returned content is `choices[0].message.content`
    /// verbatim, with no trimming or transformation.
    pub async fn draft(&self, request: &DraftRequest) -> Result<String, UpstreamError> {
        let prompt = build_prompt(&request.tone, &request.recipient, &request.note);

        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: role::USER.to_string(),
                content: prompt,
            }],
            temperature: SAMPLING_TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);

        info!(
            "Sending draft request to OpenRouter: model={}, tone={}, recipient={}",
            payload.model, request.tone, request.recipient
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Shape {
                detail: e.to_string(),
                raw: body.clone(),
            })?;

        if let Some(usage) = &completion.usage {
            info!(
                "OpenRouter response: sent_tokens={}, received_tokens={}, total_tokens={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| UpstreamError::Shape {
                detail: "empty choices array".to_string(),
                raw: body,
            })?;

        Ok(content)
    }
}

/// Build the instruction prompt sent upstream
///
/// The three inputs are interpolated verbatim; the surrounding instruction
/// asks the model for the email body alone, with no greeting or signature
/// preamble.
fn build_prompt(tone: &str, recipient: &str, note: &str) -> String {
    format!(
        "You are a helpful assistant who drafts emails in a {} tone, to be received by {}. \
         Draft the email from the following note: {}. \
         Write only the email body itself, with no greeting and no signature, \
         just the plain email based on the given parameters.",
        tone, recipient, note
    )
}
