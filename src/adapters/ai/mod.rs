//! AI adapters: the Groq failure analyzer and its test double.

mod groq_analyzer;
mod mock_analyzer;

pub use groq_analyzer::{GroqAnalyzer, GroqConfig};
pub use mock_analyzer::{MockAnalyzer, MockAnalysisResponse};
