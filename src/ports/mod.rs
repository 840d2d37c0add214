//! Ports - interfaces to external collaborators.
//!
//! The application layer depends on these traits; adapters provide the
//! implementations (libxml, Groq, PostgreSQL, static token).

mod attempt_store;
mod failure_analyzer;
mod field_extractor;
mod origin_authenticator;
mod schema_validator;

pub use attempt_store::{AttemptStore, AttemptUpdate, ValidationAttempt};
pub use failure_analyzer::{AnalysisError, AnalysisRequest, FailureAnalyzer};
pub use field_extractor::{ExtractionError, FieldExtractor};
pub use origin_authenticator::{AuthError, OriginAuthenticator};
pub use schema_validator::{SchemaError, SchemaValidator};
