use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// External text-classification service. Takes a system instruction, a user
/// prompt and a generation-length limit; returns a single untrusted text
/// blob. Implementations may time out or error — callers must treat every
/// failure as recoverable.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ClassifierError>;
}

/// Request body for the generate endpoint.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

/// Response body from the generate endpoint.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client for an Ollama-compatible generate endpoint.
pub struct OllamaClassifier {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClassifier {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        })
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, ClassifierError> {
        let start = std::time::Instant::now();
        let url = format!("{}/api/generate", self.base_url);
        debug!(
            "Classifier call starting - model={}, prompt_length={} chars",
            self.model,
            prompt.len()
        );

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
            },
        };

        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let elapsed = start.elapsed();
        info!(
            "Classifier call completed - duration={:.2}s, response_length={} chars",
            elapsed.as_secs_f32(),
            parsed.response.len()
        );
        Ok(parsed.response)
    }
}
