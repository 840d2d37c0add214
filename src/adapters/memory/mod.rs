//! In-memory adapters for tests and database-less local runs.

mod attempt_store;

pub use attempt_store::InMemoryAttemptStore;
