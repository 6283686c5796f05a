//! Typed reply records, one per JSON feature.
//!
//! Field names follow the camelCase keys the schemas declare.  None of the
//! fields have serde defaults: a reply that omits one is rejected.

use serde::{Deserialize, Serialize};

/// A short situation for speaking or writing practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub scenario: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingFeedback {
    pub pronunciation_and_clarity: String,
    pub grammar_and_word_choice: String,
    pub improved_spoken_example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingFeedback {
    pub grammar_and_spelling: String,
    pub vocabulary_and_flow: String,
    pub improved_writing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceResponse {
    pub sentences: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeaningResponse {
    pub definition: String,
    pub examples: Vec<String>,
    pub context: String,
}

/// What the speaking view shows after a successful round: the transcript
/// alongside the model's feedback on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub what_you_said: String,
    pub pronunciation_and_clarity: String,
    pub grammar_and_word_choice: String,
    pub improved_spoken_example: String,
}

impl Feedback {
    pub fn new(transcript: impl Into<String>, feedback: SpeakingFeedback) -> Self {
        Self {
            what_you_said: transcript.into(),
            pronunciation_and_clarity: feedback.pronunciation_and_clarity,
            grammar_and_word_choice: feedback.grammar_and_word_choice,
            improved_spoken_example: feedback.improved_spoken_example,
        }
    }
}
