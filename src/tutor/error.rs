//! Gateway error taxonomy.
//!
//! Every gateway failure is a [`GatewayError`]: the [`Feature`] that failed
//! plus an [`ErrorKind`].  Its `Display` output is the single display-ready
//! string the view shows: a feature-specific message followed by the cause,
//! or just the prompt for the learner when their input was rejected.

use std::fmt;

use thiserror::Error;

use crate::gemini::TransportError;

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// The tutor operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Scenario,
    Transcription,
    SpeakingFeedback,
    WritingFeedback,
    SentenceBuilder,
    MeaningContext,
}

impl Feature {
    /// Short identifier used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Scenario => "scenario",
            Feature::Transcription => "transcription",
            Feature::SpeakingFeedback => "speaking-feedback",
            Feature::WritingFeedback => "writing-feedback",
            Feature::SentenceBuilder => "sentence-builder",
            Feature::MeaningContext => "meaning-context",
        }
    }

    /// Learner-facing message shown when the operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Feature::Scenario => "Failed to generate scenario. Please try again.",
            Feature::Transcription => "Failed to transcribe audio. Please try again.",
            Feature::SpeakingFeedback => "Failed to get feedback. Please try again.",
            Feature::WritingFeedback => "Failed to get writing feedback. Please try again.",
            Feature::SentenceBuilder => "Failed to build sentences. Please try again.",
            Feature::MeaningContext => "Failed to get meaning and context. Please try again.",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Why a gateway call failed.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The network call itself failed or timed out.
    #[error("{0}")]
    Transport(TransportError),

    /// No API key was available; nothing was sent.
    #[error("no API key found; set GEMINI_API_KEY or gemini.api_key in settings.toml")]
    MissingCredential,

    /// The service replied with no text.
    #[error("no response received from the AI")]
    EmptyResponse,

    /// The reply contains no `{ ... }` object.
    #[error("AI returned text that does not contain a valid JSON object. Raw response (full): \"{raw}\"")]
    MalformedResponse { raw: String },

    /// The extracted object is not valid JSON.
    #[error("failed to parse AI response as JSON: {message}. Problematic snippet: \"{snippet}\". Extracted string (full): \"{extracted}\"")]
    Parse {
        message: String,
        snippet: String,
        extracted: String,
    },

    /// Valid JSON that does not match the declared schema.
    #[error("{message}")]
    SchemaMismatch {
        /// Declared keys absent from the reply (empty for type mismatches).
        missing: Vec<String>,
        message: String,
    },

    /// The learner's input was rejected before any request was made.
    #[error("{0}")]
    UserInput(String),
}

impl From<TransportError> for ErrorKind {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::MissingApiKey => ErrorKind::MissingCredential,
            other => ErrorKind::Transport(other),
        }
    }
}

// ---------------------------------------------------------------------------
// GatewayError
// ---------------------------------------------------------------------------

/// A failed tutor operation.
#[derive(Debug)]
pub struct GatewayError {
    pub feature: Feature,
    pub kind: ErrorKind,
}

impl GatewayError {
    pub fn new(feature: Feature, kind: impl Into<ErrorKind>) -> Self {
        Self {
            feature,
            kind: kind.into(),
        }
    }

    pub fn user_input(feature: Feature, message: impl Into<String>) -> Self {
        Self::new(feature, ErrorKind::UserInput(message.into()))
    }

    /// `true` when the request never left the machine.
    pub fn is_user_input(&self) -> bool {
        matches!(self.kind, ErrorKind::UserInput(_))
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UserInput(message) => f.write_str(message),
            kind => write!(f, "{} Error: {kind}", self.feature.failure_message()),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_wraps_cause_with_feature_message() {
        let err = GatewayError::new(Feature::SentenceBuilder, ErrorKind::EmptyResponse);
        assert_eq!(
            err.to_string(),
            "Failed to build sentences. Please try again. Error: no response received from the AI"
        );
    }

    #[test]
    fn user_input_displays_bare_message() {
        let err = GatewayError::user_input(Feature::MeaningContext, "Please enter a word or phrase.");
        assert_eq!(err.to_string(), "Please enter a word or phrase.");
        assert!(err.is_user_input());
    }

    #[test]
    fn missing_api_key_maps_to_missing_credential() {
        let err = GatewayError::new(Feature::Scenario, TransportError::MissingApiKey);
        assert!(matches!(err.kind, ErrorKind::MissingCredential));
    }

    #[test]
    fn transport_failure_keeps_message() {
        let err = GatewayError::new(
            Feature::Transcription,
            TransportError::Status {
                status: 503,
                message: "overloaded".into(),
            },
        );
        let text = err.to_string();
        assert!(text.starts_with("Failed to transcribe audio."));
        assert!(text.contains("HTTP 503: overloaded"));
    }

    #[test]
    fn every_feature_has_distinct_message() {
        let features = [
            Feature::Scenario,
            Feature::Transcription,
            Feature::SpeakingFeedback,
            Feature::WritingFeedback,
            Feature::SentenceBuilder,
            Feature::MeaningContext,
        ];
        let mut messages: Vec<&str> = features.iter().map(Feature::failure_message).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), features.len());
    }
}
