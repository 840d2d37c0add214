//! Groq Analyzer - FailureAnalyzer implementation over Groq's
//! OpenAI-compatible chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_model("openai/gpt-oss-20b")
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let analyzer = GroqAnalyzer::new(config, Some("./schemas/c1.xsd".into()));
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AnalysisError, AnalysisRequest, FailureAnalyzer};

/// Configuration for the Groq analyzer.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "openai/gpt-oss-20b").
    pub model: String,
    /// Base URL for the API (default: https://api.groq.com/openai/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "openai/gpt-oss-20b".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq-backed failure analyzer.
pub struct GroqAnalyzer {
    config: GroqConfig,
    client: Client,
    /// Schema to quote in the prompt; read per call so edits are picked up.
    xsd_path: Option<PathBuf>,
}

impl GroqAnalyzer {
    /// Creates a new analyzer with the given configuration.
    pub fn new(config: GroqConfig, xsd_path: Option<PathBuf>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            xsd_path,
        }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Assembles the analysis prompt.
    ///
    /// The contract: 1-2 bullet points, focused on structure, tags and date
    /// formats, never inventing fields; the failure detail, the schema (when
    /// readable) and the document are quoted in full.
    fn build_prompt(&self, request: &AnalysisRequest) -> String {
        let schema_text = match &self.xsd_path {
            Some(path) => std::fs::read_to_string(path)
                .unwrap_or_else(|e| format!("(schema at {} unreadable: {})", path.display(), e)),
            None => "(no schema configured)".to_string(),
        };

        format!(
            "You help debug a CNMC C1 process XML request.\n\
             Given the validation error, explain in 1-2 bullet points what may be wrong.\n\
             Do not invent fields; focus on structure/tags/date formats.\n\n\
             Validation error:\n{}\n\n\
             XSD:\n{}\n\n\
             XML:\n{}",
            request.error_detail, schema_text, request.xml
        )
    }

    /// Sends a completion request.
    async fn send_request(&self, prompt: &str) -> Result<Response, AnalysisError> {
        let body = GroqChatRequest {
            model: self.config.model.clone(),
            messages: vec![GroqMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: 0.2,
        };

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AnalysisError::network(format!("Connection failed: {}", e))
                } else {
                    AnalysisError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AnalysisError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AnalysisError::AuthenticationFailed),
            429 => {
                let retry_after = Self::parse_retry_after(&error_body);
                Err(AnalysisError::rate_limited(retry_after))
            }
            400 => Err(AnalysisError::InvalidRequest(error_body)),
            500..=599 => Err(AnalysisError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AnalysisError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from error response.
    fn parse_retry_after(error_body: &str) -> u32 {
        // Groq includes "try again in Xs" in rate-limit error messages
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed.get("error").and_then(|e| e.get("message")) {
                if let Some(s) = msg.as_str() {
                    if let Some(idx) = s.find("try again in ") {
                        let rest = &s[idx + 13..];
                        if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                            if let Ok(secs) = rest[..num_end].parse::<u32>() {
                                return secs;
                            }
                        }
                    }
                }
            }
        }
        30 // Default retry after
    }

    /// Parses a completion response into its text content.
    async fn parse_response(&self, response: Response) -> Result<String, AnalysisError> {
        let response = self.handle_response_status(response).await?;

        let chat_response: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::parse("No choices in response"))?;

        Ok(choice.message.content.trim().to_string())
    }
}

#[async_trait]
impl FailureAnalyzer for GroqAnalyzer {
    async fn explain(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
        let prompt = self.build_prompt(&request);

        let mut last_error = AnalysisError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.send_request(&prompt).await {
                Ok(response) => match self.parse_response(response).await {
                    Ok(text) => return Ok(text),
                    Err(err) => {
                        if !err.is_retryable() || retry_count >= self.config.max_retries {
                            return Err(err);
                        }
                        last_error = err;
                    }
                },
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GroqChatRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}
