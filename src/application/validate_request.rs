//! ValidateC1Handler - the validate-C1 use case.
//!
//! Persists receipt, runs the pipeline, asks the analyzer to explain any
//! rejection, and consolidates the verdict into one audit update. Analyzer
//! failures degrade to a fallback text; a receipt that cannot be persisted
//! aborts the request, because an attempt that cannot be audited is not
//! validated.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, DomainError, Timestamp};
use crate::domain::validation::ValidationFailure;
use crate::ports::{AnalysisRequest, AttemptStore, AttemptUpdate, FailureAnalyzer};

use super::pipeline::{PipelineVerdict, ValidationPipeline};

/// The handler's answer for one received document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Audit id of this attempt.
    pub attempt_id: AttemptId,
    /// True when every stage passed.
    pub accepted: bool,
    /// Wire-level code: `OK`, `XSD_INVALID` or `CONTENT_INVALID`.
    pub wire_code: &'static str,
    /// Client-facing summary, present on rejection.
    pub message: Option<String>,
    /// AI explanation (or degradation notice), present on rejection.
    pub ai_analysis: Option<String>,
}

/// Handler for validating received C1 documents.
pub struct ValidateC1Handler {
    pipeline: ValidationPipeline,
    store: Arc<dyn AttemptStore>,
    analyzer: Option<Arc<dyn FailureAnalyzer>>,
}

impl ValidateC1Handler {
    pub fn new(
        pipeline: ValidationPipeline,
        store: Arc<dyn AttemptStore>,
        analyzer: Option<Arc<dyn FailureAnalyzer>>,
    ) -> Self {
        Self {
            pipeline,
            store,
            analyzer,
        }
    }

    pub async fn handle(&self, xml: String) -> Result<ValidationOutcome, DomainError> {
        // 1. Persist receipt
        let attempt_id = self.store.insert(&xml).await?;

        // 2. Run the pipeline against today's date
        let today = Timestamp::now().date_naive();
        let verdict = match self.pipeline.run(&xml, today) {
            Ok(verdict) => verdict,
            Err(err) => {
                // The pipeline could not run; leave a trace on the attempt
                // before surfacing the internal error.
                self.record(attempt_id, AttemptUpdate::new().response_status(500))
                    .await;
                return Err(err);
            }
        };

        let (schema_valid, content_valid) = verdict.audit_flags();

        match verdict {
            PipelineVerdict::Accepted(request) => {
                tracing::info!(
                    attempt_id = %attempt_id,
                    cups = %request.cups,
                    "C1 request accepted"
                );

                self.store
                    .update(
                        attempt_id,
                        AttemptUpdate::new()
                            .schema_valid(schema_valid)
                            .content_valid(content_valid)
                            .response_status(200),
                    )
                    .await?;

                Ok(ValidationOutcome {
                    attempt_id,
                    accepted: true,
                    wire_code: "OK",
                    message: None,
                    ai_analysis: None,
                })
            }
            PipelineVerdict::Rejected(failure) => {
                tracing::info!(
                    attempt_id = %attempt_id,
                    stage = ?failure.stage(),
                    code = failure.wire_code(),
                    "C1 request rejected"
                );

                let analysis = self.analyze_or_fallback(&xml, &failure).await;

                self.store
                    .update(
                        attempt_id,
                        AttemptUpdate::new()
                            .schema_valid(schema_valid)
                            .content_valid(content_valid)
                            .ai_analysis(analysis.clone())
                            .response_status(400),
                    )
                    .await?;

                Ok(ValidationOutcome {
                    attempt_id,
                    accepted: false,
                    wire_code: failure.wire_code(),
                    message: Some(failure.summary().to_string()),
                    ai_analysis: Some(analysis),
                })
            }
        }
    }

    /// Asks the analyzer for an explanation, degrading to a fixed text when
    /// no analyzer is configured or the provider fails.
    async fn analyze_or_fallback(&self, xml: &str, failure: &ValidationFailure) -> String {
        let Some(analyzer) = &self.analyzer else {
            return "AI analysis unavailable (no API key configured).".to_string();
        };

        let request = AnalysisRequest::new(xml, failure.detail());
        match analyzer.explain(request).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "failure analysis degraded");
                format!("AI analysis unavailable ({}).", err.kind())
            }
        }
    }

    /// Best-effort audit write; failures are logged, not propagated.
    async fn record(&self, attempt_id: AttemptId, update: AttemptUpdate) {
        if let Err(err) = self.store.update(attempt_id, update).await {
            tracing::warn!(attempt_id = %attempt_id, error = %err, "audit update failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::validation::RawFields;
    use crate::ports::{
        AnalysisError, ExtractionError, FieldExtractor, SchemaError, SchemaValidator,
        ValidationAttempt,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubSchemaValidator(Result<(), SchemaError>);

    impl SchemaValidator for StubSchemaValidator {
        fn validate(&self, _xml: &str) -> Result<(), SchemaError> {
            self.0.clone()
        }
    }

    struct StubExtractor(Result<RawFields, ExtractionError>);

    impl FieldExtractor for StubExtractor {
        fn extract(&self, _xml: &str) -> Result<RawFields, ExtractionError> {
            self.0.clone()
        }
    }

    struct MockAttemptStore {
        attempts: Mutex<Vec<ValidationAttempt>>,
        fail_insert: bool,
    }

    impl MockAttemptStore {
        fn new() -> Self {
            Self {
                attempts: Mutex::new(Vec::new()),
                fail_insert: false,
            }
        }

        fn failing_insert() -> Self {
            Self {
                attempts: Mutex::new(Vec::new()),
                fail_insert: true,
            }
        }

        fn single_attempt(&self) -> ValidationAttempt {
            let attempts = self.attempts.lock().unwrap();
            assert_eq!(attempts.len(), 1);
            attempts[0].clone()
        }
    }

    #[async_trait]
    impl AttemptStore for MockAttemptStore {
        async fn insert(&self, received_xml: &str) -> Result<AttemptId, DomainError> {
            if self.fail_insert {
                return Err(DomainError::database("simulated insert failure"));
            }
            let attempt = ValidationAttempt::received(AttemptId::new(), received_xml);
            let id = attempt.id;
            self.attempts.lock().unwrap().push(attempt);
            Ok(id)
        }

        async fn update(&self, id: AttemptId, update: AttemptUpdate) -> Result<(), DomainError> {
            let mut attempts = self.attempts.lock().unwrap();
            let attempt = attempts
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| DomainError::new(ErrorCode::AttemptNotFound, "no such attempt"))?;
            update.apply_to(attempt);
            Ok(())
        }

        async fn find(&self, id: AttemptId) -> Result<Option<ValidationAttempt>, DomainError> {
            Ok(self
                .attempts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned())
        }
    }

    struct MockAnalyzer {
        result: Result<String, fn() -> AnalysisError>,
        requests: Mutex<Vec<AnalysisRequest>>,
    }

    impl MockAnalyzer {
        fn answering(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> AnalysisError) -> Self {
            Self {
                result: Err(err),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<AnalysisRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FailureAnalyzer for MockAnalyzer {
        async fn explain(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
            self.requests.lock().unwrap().push(request);
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(make_err) => Err(make_err()),
            }
        }
    }

    fn valid_fields() -> RawFields {
        RawFields {
            cups: "ES0021000000000001AB".to_string(),
            // Far enough out that "today" never catches up with the test.
            request_date: "2999-01-01".to_string(),
        }
    }

    fn passing_pipeline() -> ValidationPipeline {
        ValidationPipeline::new(
            Arc::new(StubSchemaValidator(Ok(()))),
            Arc::new(StubExtractor(Ok(valid_fields()))),
        )
    }

    fn schema_failing_pipeline() -> ValidationPipeline {
        ValidationPipeline::new(
            Arc::new(StubSchemaValidator(Err(SchemaError::Violations {
                messages: vec!["element FechaSolicitud expected".to_string()],
            }))),
            Arc::new(StubExtractor(Ok(valid_fields()))),
        )
    }

    fn content_failing_pipeline() -> ValidationPipeline {
        ValidationPipeline::new(
            Arc::new(StubSchemaValidator(Ok(()))),
            Arc::new(StubExtractor(Err(ExtractionError::MissingField {
                field: "CUPS",
            }))),
        )
    }

    #[tokio::test]
    async fn accepted_document_records_full_audit_trail() {
        let store = Arc::new(MockAttemptStore::new());
        let handler = ValidateC1Handler::new(passing_pipeline(), store.clone(), None);

        let outcome = handler.handle("<xml/>".to_string()).await.unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.wire_code, "OK");
        assert!(outcome.message.is_none());
        assert!(outcome.ai_analysis.is_none());

        let attempt = store.single_attempt();
        assert_eq!(attempt.received_xml, "<xml/>");
        assert_eq!(attempt.schema_valid, Some(true));
        assert_eq!(attempt.content_valid, Some(true));
        assert_eq!(attempt.response_status, Some(200));
        assert!(attempt.ai_analysis.is_none());
    }

    #[tokio::test]
    async fn schema_rejection_answers_xsd_invalid() {
        let store = Arc::new(MockAttemptStore::new());
        let analyzer = Arc::new(MockAnalyzer::answering("- the date element is absent"));
        let handler = ValidateC1Handler::new(
            schema_failing_pipeline(),
            store.clone(),
            Some(analyzer.clone()),
        );

        let outcome = handler.handle("<xml/>".to_string()).await.unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.wire_code, "XSD_INVALID");
        assert_eq!(
            outcome.ai_analysis.as_deref(),
            Some("- the date element is absent")
        );

        let attempt = store.single_attempt();
        assert_eq!(attempt.schema_valid, Some(false));
        assert_eq!(attempt.content_valid, Some(false));
        assert_eq!(attempt.response_status, Some(400));
        assert_eq!(
            attempt.ai_analysis.as_deref(),
            Some("- the date element is absent")
        );
    }

    #[tokio::test]
    async fn content_rejection_answers_content_invalid() {
        let store = Arc::new(MockAttemptStore::new());
        let handler = ValidateC1Handler::new(content_failing_pipeline(), store.clone(), None);

        let outcome = handler.handle("<xml/>".to_string()).await.unwrap();

        assert!(!outcome.accepted);
        assert_eq!(outcome.wire_code, "CONTENT_INVALID");

        let attempt = store.single_attempt();
        assert_eq!(attempt.schema_valid, Some(true));
        assert_eq!(attempt.content_valid, Some(false));
        assert_eq!(attempt.response_status, Some(400));
    }

    #[tokio::test]
    async fn analyzer_receives_xml_and_failure_detail() {
        let store = Arc::new(MockAttemptStore::new());
        let analyzer = Arc::new(MockAnalyzer::answering("- check the schema"));
        let handler = ValidateC1Handler::new(
            schema_failing_pipeline(),
            store,
            Some(analyzer.clone()),
        );

        handler.handle("<Solicitud/>".to_string()).await.unwrap();

        let requests = analyzer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].xml, "<Solicitud/>");
        assert!(requests[0].error_detail.contains("FechaSolicitud expected"));
    }

    #[tokio::test]
    async fn analyzer_error_degrades_without_failing_the_request() {
        let store = Arc::new(MockAttemptStore::new());
        let analyzer = Arc::new(MockAnalyzer::failing(|| {
            AnalysisError::Timeout { timeout_secs: 30 }
        }));
        let handler =
            ValidateC1Handler::new(schema_failing_pipeline(), store.clone(), Some(analyzer));

        let outcome = handler.handle("<xml/>".to_string()).await.unwrap();

        assert!(!outcome.accepted);
        assert_eq!(
            outcome.ai_analysis.as_deref(),
            Some("AI analysis unavailable (timeout).")
        );
        assert_eq!(
            store.single_attempt().ai_analysis.as_deref(),
            Some("AI analysis unavailable (timeout).")
        );
    }

    #[tokio::test]
    async fn missing_analyzer_degrades_to_configuration_notice() {
        let store = Arc::new(MockAttemptStore::new());
        let handler = ValidateC1Handler::new(schema_failing_pipeline(), store, None);

        let outcome = handler.handle("<xml/>".to_string()).await.unwrap();

        assert_eq!(
            outcome.ai_analysis.as_deref(),
            Some("AI analysis unavailable (no API key configured).")
        );
    }

    #[tokio::test]
    async fn accepted_document_never_consults_the_analyzer() {
        let store = Arc::new(MockAttemptStore::new());
        let analyzer = Arc::new(MockAnalyzer::answering("should not be asked"));
        let handler =
            ValidateC1Handler::new(passing_pipeline(), store, Some(analyzer.clone()));

        handler.handle("<xml/>".to_string()).await.unwrap();

        assert!(analyzer.requests().is_empty());
    }

    #[tokio::test]
    async fn insert_failure_aborts_the_request() {
        let store = Arc::new(MockAttemptStore::failing_insert());
        let analyzer = Arc::new(MockAnalyzer::answering("unused"));
        let handler = ValidateC1Handler::new(
            schema_failing_pipeline(),
            store,
            Some(analyzer.clone()),
        );

        let err = handler.handle("<xml/>".to_string()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(analyzer.requests().is_empty());
    }

    #[tokio::test]
    async fn unavailable_schema_surfaces_internal_error_with_status_trace() {
        let pipeline = ValidationPipeline::new(
            Arc::new(StubSchemaValidator(Err(SchemaError::unavailable(
                "cannot read ./schemas/c1.xsd",
            )))),
            Arc::new(StubExtractor(Ok(valid_fields()))),
        );
        let store = Arc::new(MockAttemptStore::new());
        let handler = ValidateC1Handler::new(pipeline, store.clone(), None);

        let err = handler.handle("<xml/>".to_string()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SchemaUnavailable);
        assert_eq!(store.single_attempt().response_status, Some(500));
    }
}
