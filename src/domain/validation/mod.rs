//! The C1 validation model.
//!
//! Value objects for the two validated business fields, the typed request
//! that exists only once every rule has passed, and the failure taxonomy
//! the pipeline reports in.

mod cups;
mod fields;
mod outcome;
mod request_date;

pub use cups::Cups;
pub use fields::{C1Request, RawFields};
pub use outcome::{RuleViolation, ValidationFailure, ValidationStage};
pub use request_date::RequestDate;
