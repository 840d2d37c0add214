//! In-memory implementation of AttemptStore.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{AttemptId, DomainError, ErrorCode};
use crate::ports::{AttemptStore, AttemptUpdate, ValidationAttempt};

/// In-memory AttemptStore over a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    attempts: Mutex<Vec<ValidationAttempt>>,
}

impl InMemoryAttemptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All attempts recorded so far, in insertion order.
    pub fn attempts(&self) -> Vec<ValidationAttempt> {
        self.attempts.lock().unwrap().clone()
    }

    /// Number of attempts recorded.
    pub fn len(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.attempts.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn insert(&self, received_xml: &str) -> Result<AttemptId, DomainError> {
        let attempt = ValidationAttempt::received(AttemptId::new(), received_xml);
        let id = attempt.id;
        self.attempts.lock().unwrap().push(attempt);
        Ok(id)
    }

    async fn update(&self, id: AttemptId, update: AttemptUpdate) -> Result<(), DomainError> {
        let mut attempts = self.attempts.lock().unwrap();
        let attempt = attempts.iter_mut().find(|a| a.id == id).ok_or_else(|| {
            DomainError::new(ErrorCode::AttemptNotFound, format!("Attempt not found: {}", id))
        })?;
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
