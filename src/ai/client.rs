//! The generation backend seam and its HTTP implementation.

use std::time::Duration;

use tracing::{debug, warn};

use crate::ai::provider::{AuthScheme, Provider};
use crate::ai::request::{build_request, extract_text, TaskType};
use crate::error::{OptimizerError, OptimizerResult};

/// Network timeout for one generation call.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque text generation: system instruction and content in,
/// generated text or a per-call failure out. Single attempt, no
/// retries; callers decide whether a failure aborts anything.
pub trait TextGenerator: Send {
    fn generate(&self, task: TaskType, content: &str) -> OptimizerResult<String>;
}

/// Explicit backend configuration, injected at construction time.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub provider: Provider,
    pub api_key: String,
    /// `None` selects the provider's default model.
    pub model_id: Option<String>,
}

impl GeneratorConfig {
    fn model(&self) -> &str {
        self.model_id
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.provider.default_model())
    }
}

/// Blocking HTTP client for the configured provider.
pub struct HttpGenerator {
    config: GeneratorConfig,
    client: reqwest::blocking::Client,
}

impl HttpGenerator {
    /// Build a client with the standard timeout.
    ///
    /// # Errors
    ///
    /// `BackendNotConfigured` if the API key is empty; otherwise any
    /// client construction failure.
    pub fn new(config: GeneratorConfig) -> OptimizerResult<Self> {
        if config.api_key.is_empty() {
            return Err(OptimizerError::BackendNotConfigured);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }
}

impl TextGenerator for HttpGenerator {
    fn generate(&self, task: TaskType, content: &str) -> OptimizerResult<String> {
        let provider = self.config.provider;
        let model = self.config.model();
        let body = build_request(provider, model, content, task);

        let mut url = provider.endpoint(model);
        let mut request = self.client.post(&url);
        match provider.auth_scheme() {
            AuthScheme::Bearer => {
                request = request.bearer_auth(&self.config.api_key);
            }
            AuthScheme::XApiKey => {
                request = request
                    .header("x-api-key", &self.config.api_key)
                    .header("anthropic-version", "2023-06-01");
            }
            AuthScheme::Query => {
                url = format!("{url}?key={}", self.config.api_key);
                request = self.client.post(&url);
            }
        }

        debug!(?provider, model, ?task, "generation request");
        let response = request.json(&body).send().map_err(|e| {
            warn!(error = %e, "generation transport failure");
            OptimizerError::Generation(e.to_string())
        })?;

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| OptimizerError::Generation(format!("malformed response body: {e}")))?;
        extract_text(provider, &payload)
    }
}
