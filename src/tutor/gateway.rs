//! Feature gateways.
//!
//! [`Tutor`] owns a [`GenerationClient`] and the per-feature model names.
//! Each public method validates its input, builds the feature prompt, issues
//! exactly one request and turns the reply into a typed record.  Input that
//! is empty or whitespace-only is rejected before anything is sent.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::audio::AudioClip;
use crate::config::{AppConfig, ModelConfig};
use crate::gemini::{GeminiClient, GenerationClient, GenerationRequest, Part};

use super::error::{ErrorKind, Feature, GatewayError};
use super::extract::parse_record;
use super::prompt::{FeaturePrompt, PromptBuilder};
use super::records::{
    MeaningResponse, ScenarioResponse, SentenceResponse, SpeakingFeedback, WritingFeedback,
};

/// Entry point for every tutor operation.
///
/// Cheap to share: wrap it in an `Arc` or clone the client handle.
///
/// ```rust,no_run
/// use fluent_flow::config::AppConfig;
/// use fluent_flow::tutor::Tutor;
///
/// # async fn example() {
/// let tutor = Tutor::from_config(&AppConfig::default());
/// match tutor.build_sentences("borrow", "en-US").await {
///     Ok(reply) => println!("{}", reply.explanation),
///     Err(e) => eprintln!("{e}"),
/// }
/// # }
/// ```
pub struct Tutor {
    client: Arc<dyn GenerationClient>,
    models: ModelConfig,
}

impl Tutor {
    pub fn new(client: Arc<dyn GenerationClient>, models: ModelConfig) -> Self {
        Self { client, models }
    }

    /// Build a tutor backed by [`GeminiClient`].
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(GeminiClient::from_config(&config.gemini)),
            config.models.clone(),
        )
    }

    // -----------------------------------------------------------------------
    // Feature operations
    // -----------------------------------------------------------------------

    /// A beginner-level practice situation in `language`.
    pub async fn generate_scenario(&self, language: &str) -> Result<ScenarioResponse, GatewayError> {
        let feature = Feature::Scenario;
        let language = require_language(feature, language)?;
        let prompt = PromptBuilder::new(language).scenario();
        self.request_record(feature, &self.models.scenario, prompt)
            .await
    }

    /// Transcribe `clip`.  The returned text is trimmed and may be empty when
    /// the model heard no speech.
    pub async fn transcribe_audio(
        &self,
        clip: &AudioClip,
        language: &str,
    ) -> Result<String, GatewayError> {
        let feature = Feature::Transcription;
        let language = require_language(feature, language)?;
        if clip.is_empty() {
            return Err(GatewayError::user_input(
                feature,
                "No audio recorded. Please try again.",
            ));
        }

        let prompt = PromptBuilder::new(language).transcription();
        let request = GenerationRequest {
            model: self.models.transcription.clone(),
            system_instruction: prompt.system_instruction,
            parts: vec![
                Part::text(prompt.prompt),
                Part::inline(clip.mime_type.as_str(), &clip.bytes),
            ],
            params: prompt.params,
            schema: None,
        };

        let raw = self.send(feature, &request).await?;
        Ok(raw.trim().to_string())
    }

    /// Feedback on a spoken sentence (usually a transcript).
    pub async fn speaking_feedback(
        &self,
        transcript: &str,
        language: &str,
    ) -> Result<SpeakingFeedback, GatewayError> {
        let feature = Feature::SpeakingFeedback;
        let language = require_language(feature, language)?;
        let transcript = require_text(feature, transcript, "No speech detected. Please try again.")?;
        let prompt = PromptBuilder::new(language).speaking_feedback(transcript);
        self.request_record(feature, &self.models.speaking_feedback, prompt)
            .await
    }

    /// Feedback on a written answer.
    pub async fn writing_feedback(
        &self,
        text: &str,
        language: &str,
    ) -> Result<WritingFeedback, GatewayError> {
        let feature = Feature::WritingFeedback;
        let language = require_language(feature, language)?;
        let text = require_text(
            feature,
            text,
            "Please write something before getting feedback.",
        )?;
        let prompt = PromptBuilder::new(language).writing_feedback(text);
        self.request_record(feature, &self.models.writing_feedback, prompt)
            .await
    }

    /// Example sentences and a usage note for `word`.
    pub async fn build_sentences(
        &self,
        word: &str,
        language: &str,
    ) -> Result<SentenceResponse, GatewayError> {
        let feature = Feature::SentenceBuilder;
        let language = require_language(feature, language)?;
        let word = require_text(feature, word, "Please enter a word or phrase.")?;
        let prompt = PromptBuilder::new(language).sentences(word);
        self.request_record(feature, &self.models.sentence_builder, prompt)
            .await
    }

    /// Definition, examples and usage context for `query`.
    pub async fn meaning_and_context(
        &self,
        query: &str,
        language: &str,
    ) -> Result<MeaningResponse, GatewayError> {
        let feature = Feature::MeaningContext;
        let language = require_language(feature, language)?;
        let query = require_text(feature, query, "Please enter a word or phrase.")?;
        let prompt = PromptBuilder::new(language).meaning(query);
        self.request_record(feature, &self.models.meaning_context, prompt)
            .await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn request_record<T: DeserializeOwned>(
        &self,
        feature: Feature,
        model: &str,
        prompt: FeaturePrompt,
    ) -> Result<T, GatewayError> {
        let Some(schema) = prompt.schema else {
            return Err(GatewayError::new(
                feature,
                ErrorKind::SchemaMismatch {
                    missing: Vec::new(),
                    message: "feature has no response schema".into(),
                },
            ));
        };

        let request = GenerationRequest {
            model: model.to_string(),
            system_instruction: prompt.system_instruction,
            parts: vec![Part::text(prompt.prompt)],
            params: prompt.params,
            schema: Some(schema.clone()),
        };

        let raw = self.send(feature, &request).await?;
        parse_record(&raw, &schema).map_err(|kind| {
            let err = GatewayError::new(feature, kind);
            log::error!("{feature}: {err}");
            err
        })
    }

    /// One round trip.  Logs the request summary and the raw reply.
    async fn send(&self, feature: Feature, request: &GenerationRequest) -> Result<String, GatewayError> {
        log::debug!("{feature}: request {}", request.summary());

        match self.client.generate(request).await {
            Ok(raw) => {
                log::debug!("{feature}: raw reply {raw:?}");
                Ok(raw)
            }
            Err(e) => {
                let err = GatewayError::new(feature, e);
                log::error!("{feature}: {err}");
                Err(err)
            }
        }
    }
}

fn require_text<'a>(feature: Feature, input: &'a str, message: &str) -> Result<&'a str, GatewayError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(GatewayError::user_input(feature, message))
    } else {
        Ok(trimmed)
    }
}

fn require_language(feature: Feature, language: &str) -> Result<&str, GatewayError> {
    require_text(feature, language, "Please select a language.")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
