//! Tutor feature gateways.
//!
//! This module provides:
//! * [`Tutor`] — the six learner-facing operations (scenario, transcription,
//!   speaking/writing feedback, sentence builder, meaning and context).
//! * [`PromptBuilder`] — per-feature prompt text, schema and parameters.
//! * [`extract_json_object`] / [`parse_record`] — tolerant reply extraction.
//! * Typed reply records and the [`GatewayError`] taxonomy.

pub mod error;
pub mod extract;
pub mod gateway;
pub mod prompt;
pub mod records;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use error::{ErrorKind, Feature, GatewayError};
pub use extract::{extract_json_object, parse_json_object, parse_record};
pub use gateway::Tutor;
pub use prompt::{FeaturePrompt, PromptBuilder};
pub use records::{
    Feedback, MeaningResponse, ScenarioResponse, SentenceResponse, SpeakingFeedback,
    WritingFeedback,
};
