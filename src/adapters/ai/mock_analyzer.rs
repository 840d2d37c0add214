//! Mock Failure Analyzer for testing.
//!
//! Configurable test double for the FailureAnalyzer port: pre-queued
//! responses, error injection and call recording, so tests never touch a
//! real provider.
//!
//! # Example
//!
//! ```ignore
//! let analyzer = MockAnalyzer::new()
//!     .with_response("- FechaSolicitud is missing");
//!
//! let text = analyzer.explain(request).await?;
//! assert_eq!(text, "- FechaSolicitud is missing");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AnalysisError, AnalysisRequest, FailureAnalyzer};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockAnalysisResponse {
    /// Return this text.
    Text(String),
    /// Return a timeout error.
    Timeout { timeout_secs: u32 },
    /// Return an unavailable error.
    Unavailable { message: String },
    /// Return an authentication failure.
    AuthenticationFailed,
}

impl MockAnalysisResponse {
    fn into_result(self) -> Result<String, AnalysisError> {
        match self {
            MockAnalysisResponse::Text(text) => Ok(text),
            MockAnalysisResponse::Timeout { timeout_secs } => {
                Err(AnalysisError::Timeout { timeout_secs })
            }
            MockAnalysisResponse::Unavailable { message } => {
                Err(AnalysisError::unavailable(message))
            }
            MockAnalysisResponse::AuthenticationFailed => Err(AnalysisError::AuthenticationFailed),
        }
    }
}

/// Mock analyzer for testing.
///
/// Responses are consumed in order; when the queue is empty a fixed default
/// text is returned.
#[derive(Debug, Clone, Default)]
pub struct MockAnalyzer {
    responses: Arc<Mutex<VecDeque<MockAnalysisResponse>>>,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockAnalyzer {
    /// Creates a new mock analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockAnalysisResponse::Text(text.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, response: MockAnalysisResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of explain calls made.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FailureAnalyzer for MockAnalyzer {
    async fn explain(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
        self.requests.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response.into_result(),
            None => Ok("- mock analysis".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let analyzer = MockAnalyzer::new()
            .with_response("first")
            .with_response("second");

        let a = analyzer.explain(AnalysisRequest::new("<x/>", "e1")).await;
        let b = analyzer.explain(AnalysisRequest::new("<x/>", "e2")).await;

        assert_eq!(a.unwrap(), "first");
        assert_eq!(b.unwrap(), "second");
    }

    #[tokio::test]
    async fn empty_queue_falls_back_to_default_text() {
        let analyzer = MockAnalyzer::new();
        let text = analyzer
            .explain(AnalysisRequest::new("<x/>", "e"))
            .await
            .unwrap();
        assert_eq!(text, "- mock analysis");
    }

    #[tokio::test]
    async fn injected_errors_are_returned() {
        let analyzer = MockAnalyzer::new()
            .with_error(MockAnalysisResponse::Timeout { timeout_secs: 5 });

        let result = analyzer.explain(AnalysisRequest::new("<x/>", "e")).await;
        assert!(matches!(
            result,
            Err(AnalysisError::Timeout { timeout_secs: 5 })
        ));
    }

    #[tokio::test]
    async fn records_every_request() {
        let analyzer = MockAnalyzer::new();
        analyzer
            .explain(AnalysisRequest::new("<a/>", "first error"))
            .await
            .unwrap();
        analyzer
            .explain(AnalysisRequest::new("<b/>", "second error"))
            .await
            .unwrap();

        assert_eq!(analyzer.call_count(), 2);
        assert_eq!(analyzer.requests()[0].xml, "<a/>");
        assert_eq!(analyzer.requests()[1].error_detail, "second error");
    }
}
