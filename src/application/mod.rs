//! Application layer: the validation pipeline and the validate-C1 use case.

mod pipeline;
mod validate_request;

pub use pipeline::{PipelineVerdict, ValidationPipeline};
pub use validate_request::{ValidateC1Handler, ValidationOutcome};
