use crate::ports::outbound::AnalysisBackend;
use crate::shared::{Result, TriageError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Gemini generateContent client
///
/// Sends one structured-output generation request per analysis: the
/// instruction prompt plus the declared response schema, low temperature
/// for deterministic triage output.
///
/// # Security
/// - Implements timeout (60 seconds)
/// - Does not retry failed requests
/// - A missing credential is a configuration error raised before any
///   network I/O
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    const API_BASE: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    const DEFAULT_MODEL: &'static str = "gemini-2.5-pro";
    const TIMEOUT_SECONDS: u64 = 60;
    const TEMPERATURE: f64 = 0.2;

    /// Creates a new Gemini client.
    ///
    /// The key may be absent: construction succeeds so the rest of the
    /// dashboard keeps working, and every analysis attempt then fails
    /// with `ConfigurationMissing` before reaching the network.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cyberguard/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            base_url: Self::API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL (for tests against a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| TriageError::ConfigurationMissing.into())
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                TriageError::BackendCallFailed {
                    details: "backend response contained no candidates".to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl AnalysisBackend for GeminiClient {
    async fn generate(&self, prompt: &str, response_schema: Value) -> Result<String> {
        let key = self.credential()?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: Self::TEMPERATURE,
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TriageError::BackendCallFailed {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TriageError::BackendCallFailed {
                details: format!("backend returned status code {}", status),
            }
            .into());
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| TriageError::BackendCallFailed {
                    details: format!("failed to decode backend envelope: {}", e),
                })?;

        Self::extract_text(parsed)
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
