//! Attempt Store Port - audit persistence for validation attempts.
//!
//! Every received document becomes a row at receipt; verdict fields are
//! filled in as the pipeline and the analyzer produce them. The update is
//! partial by design: only populated fields are written, so late stages
//! never clobber what earlier stages recorded.

use async_trait::async_trait;

use crate::domain::foundation::{AttemptId, DomainError, Timestamp};

/// Port for persisting validation attempts.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Records receipt of a document and returns the new attempt id.
    async fn insert(&self, received_xml: &str) -> Result<AttemptId, DomainError>;

    /// Applies a partial update to an attempt. An empty update is a no-op.
    async fn update(&self, id: AttemptId, update: AttemptUpdate) -> Result<(), DomainError>;

    /// Fetches an attempt for audit read-back.
    async fn find(&self, id: AttemptId) -> Result<Option<ValidationAttempt>, DomainError>;
}

/// A persisted validation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationAttempt {
    pub id: AttemptId,
    pub received_at: Timestamp,
    pub received_xml: String,
    pub schema_valid: Option<bool>,
    pub content_valid: Option<bool>,
    pub ai_analysis: Option<String>,
    pub response_status: Option<i32>,
}

impl ValidationAttempt {
    /// Creates a fresh attempt record with no verdicts yet.
    pub fn received(id: AttemptId, received_xml: impl Into<String>) -> Self {
        Self {
            id,
            received_at: Timestamp::now(),
            received_xml: received_xml.into(),
            schema_valid: None,
            content_valid: None,
            ai_analysis: None,
            response_status: None,
        }
    }
}

/// Partial update of an attempt's verdict fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptUpdate {
    pub schema_valid: Option<bool>,
    pub content_valid: Option<bool>,
    pub ai_analysis: Option<String>,
    pub response_status: Option<i32>,
}

impl AttemptUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema verdict.
    pub fn schema_valid(mut self, valid: bool) -> Self {
        self.schema_valid = Some(valid);
        self
    }

    /// Sets the content verdict.
    pub fn content_valid(mut self, valid: bool) -> Self {
        self.content_valid = Some(valid);
        self
    }

    /// Sets the AI analysis text.
    pub fn ai_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.ai_analysis = Some(analysis.into());
        self
    }

    /// Sets the HTTP status the attempt was answered with.
    pub fn response_status(mut self, status: i32) -> Self {
        self.response_status = Some(status);
        self
    }

    /// Returns true when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.schema_valid.is_none()
            && self.content_valid.is_none()
            && self.ai_analysis.is_none()
            && self.response_status.is_none()
    }

    /// Applies this update to an attempt record in place.
    pub fn apply_to(&self, attempt: &mut ValidationAttempt) {
        if let Some(valid) = self.schema_valid {
            attempt.schema_valid = Some(valid);
        }
        if let Some(valid) = self.content_valid {
            attempt.content_valid = Some(valid);
        }
        if let Some(ref analysis) = self.ai_analysis {
            attempt.ai_analysis = Some(analysis.clone());
        }
        if let Some(status) = self.response_status {
            attempt.response_status = Some(status);
        }
    }
}
