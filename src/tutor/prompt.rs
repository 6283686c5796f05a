//! Prompt and schema builder for every tutor feature.
//!
//! [`PromptBuilder`] is bound to one target language.  Each method returns a
//! [`FeaturePrompt`]: optional system instruction, the prompt text, the
//! response schema (for JSON features) and the generation parameters.  The
//! builder is a pure function of its inputs.

use crate::gemini::{GenerationParams, Schema};

// ---------------------------------------------------------------------------
// Generation parameters
// ---------------------------------------------------------------------------

const TRANSCRIPTION_MAX_TOKENS: u32 = 256;
const SCENARIO_MAX_TOKENS: u32 = 256;
const SCENARIO_TEMPERATURE: f32 = 0.5;
const FEEDBACK_MAX_TOKENS: u32 = 512;
const FEEDBACK_TEMPERATURE: f32 = 0.7;
const FEEDBACK_TOP_K: u32 = 64;
const FEEDBACK_TOP_P: f32 = 0.95;
const SENTENCES_MAX_TOKENS: u32 = 256;
const SENTENCES_TEMPERATURE: f32 = 0.5;
const MEANING_MAX_TOKENS: u32 = 512;
const MEANING_TEMPERATURE: f32 = 0.6;

// ---------------------------------------------------------------------------
// FeaturePrompt
// ---------------------------------------------------------------------------

/// Model-independent request content for one feature call.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePrompt {
    pub system_instruction: Option<String>,
    pub prompt: String,
    /// `Some` for JSON features; the reply must match it.
    pub schema: Option<Schema>,
    pub params: GenerationParams,
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds feature prompts for one target language.
///
/// # Example
/// ```rust
/// use fluent_flow::tutor::PromptBuilder;
///
/// let builder = PromptBuilder::new("es-ES");
/// let prompt = builder.sentences("comer");
/// assert!(prompt.prompt.contains("\"comer\""));
/// assert!(prompt.prompt.contains("es-ES"));
/// ```
pub struct PromptBuilder {
    language: String,
}

impl PromptBuilder {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Instruction that accompanies the inline audio part.
    pub fn transcription(&self) -> FeaturePrompt {
        FeaturePrompt {
            system_instruction: None,
            prompt: format!(
                "Transcribe the following audio in {}. Do not add any conversational filler. \
                 Only return the transcribed text.",
                self.language
            ),
            schema: None,
            params: GenerationParams::capped(TRANSCRIPTION_MAX_TOKENS),
        }
    }

    pub fn scenario(&self) -> FeaturePrompt {
        let lang = &self.language;
        FeaturePrompt {
            system_instruction: None,
            prompt: format!(
                "Generate a concise, beginner-level speaking practice scenario (1-2 sentences) \
                 describing a common daily situation for a language learner practicing {lang}. \
                 Do not include any conversational filler or introductory text; return only the \
                 JSON object."
            ),
            schema: Some(Schema::object([(
                "scenario",
                Schema::string()
                    .describe(format!("A short, beginner-friendly speaking scenario in {lang}.")),
            )])),
            params: GenerationParams::capped(SCENARIO_MAX_TOKENS)
                .with_temperature(SCENARIO_TEMPERATURE),
        }
    }

    pub fn speaking_feedback(&self, transcript: &str) -> FeaturePrompt {
        let lang = &self.language;
        FeaturePrompt {
            system_instruction: Some(format!(
                "You are a friendly, encouraging, and highly effective language tutor for \
                 learners of {lang}. Your goal is to provide constructive feedback on spoken \
                 {lang}, focusing on clarity, pronunciation, grammar, and natural word choice for \
                 beginner learners. Keep feedback clear and simple. Always provide an improved \
                 spoken example."
            )),
            prompt: format!(
                "The user spoke the following sentence in {lang}: \"{transcript}\".\n\n\
                 Please provide feedback on:\n\
                 1.  **Pronunciation & Clarity:** How clear was the speech? Any common \
                 pronunciation points for a beginner?\n\
                 2.  **Grammar & Word Choice:** Any grammatical errors or suggestions for more \
                 natural phrasing?\n\
                 3.  **Improved Spoken Example:** Provide one clear, natural-sounding example of \
                 how the sentence could be spoken or rephrased in {lang}.\n\n\
                 Return the feedback as a JSON object with the following keys: \
                 `pronunciationAndClarity`, `grammarAndWordChoice`, and `improvedSpokenExample`."
            ),
            schema: Some(Schema::object([
                (
                    "pronunciationAndClarity",
                    Schema::string().describe("Feedback on pronunciation and clarity."),
                ),
                (
                    "grammarAndWordChoice",
                    Schema::string().describe("Feedback on grammar and word choice."),
                ),
                (
                    "improvedSpokenExample",
                    Schema::string()
                        .describe(format!("An improved example of the sentence in {lang}.")),
                ),
            ])),
            params: feedback_params(),
        }
    }

    pub fn writing_feedback(&self, text: &str) -> FeaturePrompt {
        let lang = &self.language;
        FeaturePrompt {
            system_instruction: Some(format!(
                "You are a friendly, encouraging, and highly effective language tutor for \
                 learners of {lang}. Your goal is to provide constructive feedback on written \
                 {lang}, focusing on grammar, spelling, vocabulary, and natural flow for beginner \
                 learners. Keep feedback clear and simple. Always provide an improved version of \
                 the text."
            )),
            prompt: format!(
                "The user wrote the following text in {lang}: \"{text}\".\n\n\
                 Please provide feedback on:\n\
                 1.  **Grammar & Spelling:** Any grammatical errors or spelling mistakes?\n\
                 2.  **Vocabulary & Flow:** Suggestions for more natural word choice or sentence \
                 structure?\n\
                 3.  **Improved Writing Example:** Provide one clear, natural-sounding improved \
                 version of the text in {lang}.\n\n\
                 Return the feedback as a JSON object with the following keys: \
                 `grammarAndSpelling`, `vocabularyAndFlow`, and `improvedWriting`."
            ),
            schema: Some(Schema::object([
                (
                    "grammarAndSpelling",
                    Schema::string().describe("Feedback on grammar and spelling."),
                ),
                (
                    "vocabularyAndFlow",
                    Schema::string().describe("Feedback on vocabulary and natural flow."),
                ),
                (
                    "improvedWriting",
                    Schema::string()
                        .describe(format!("An improved version of the written text in {lang}.")),
                ),
            ])),
            params: feedback_params(),
        }
    }

    pub fn sentences(&self, word: &str) -> FeaturePrompt {
        let lang = &self.language;
        FeaturePrompt {
            system_instruction: None,
            prompt: format!(
                "Provide 3-5 example sentences using the word \"{word}\" in {lang}, and a brief \
                 explanation of its common usage. The sentences should be suitable for a beginner \
                 language learner.\n\n\
                 Return the response as a JSON object with the keys `sentences` (an array of \
                 strings) and `explanation` (a string)."
            ),
            schema: Some(Schema::object([
                (
                    "sentences",
                    Schema::array(Schema::string())
                        .describe(format!("Example sentences using the word in {lang}.")),
                ),
                (
                    "explanation",
                    Schema::string()
                        .describe(format!("Explanation of the word's usage in {lang}.")),
                ),
            ])),
            params: GenerationParams::capped(SENTENCES_MAX_TOKENS)
                .with_temperature(SENTENCES_TEMPERATURE),
        }
    }

    pub fn meaning(&self, query: &str) -> FeaturePrompt {
        let lang = &self.language;
        FeaturePrompt {
            system_instruction: None,
            prompt: format!(
                "For the {lang} word or phrase \"{query}\", provide a concise definition, 2-3 \
                 example sentences, and a brief explanation of its common context or nuances.\n\n\
                 Return the response as a JSON object with the keys `definition` (string), \
                 `examples` (array of strings), and `context` (string)."
            ),
            schema: Some(Schema::object([
                (
                    "definition",
                    Schema::string()
                        .describe(format!("Definition of the word/phrase in {lang}.")),
                ),
                (
                    "examples",
                    Schema::array(Schema::string()).describe(format!(
                        "Example sentences using the word/phrase in {lang}."
                    )),
                ),
                (
                    "context",
                    Schema::string().describe(format!(
                        "Contextual explanation of the word/phrase in {lang}."
                    )),
                ),
            ])),
            params: GenerationParams::capped(MEANING_MAX_TOKENS)
                .with_temperature(MEANING_TEMPERATURE),
        }
    }
}

fn feedback_params() -> GenerationParams {
    GenerationParams::capped(FEEDBACK_MAX_TOKENS)
        .with_temperature(FEEDBACK_TEMPERATURE)
        .with_top_k_top_p(FEEDBACK_TOP_K, FEEDBACK_TOP_P)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_is_plain_text_with_small_cap() {
        let p = PromptBuilder::new("de-DE").transcription();
        assert!(p.schema.is_none());
        assert!(p.system_instruction.is_none());
        assert!(p.prompt.contains("in de-DE"));
        assert_eq!(p.params, GenerationParams::capped(256));
    }

    #[test]
    fn scenario_declares_single_scenario_key() {
        let p = PromptBuilder::new("fr-FR").scenario();
        let schema = p.schema.expect("scenario is a JSON feature");
        assert_eq!(schema.required_keys(), vec!["scenario"]);
        assert!(p.prompt.contains("practicing fr-FR"));
        assert_eq!(p.params.temperature, Some(0.5));
        assert_eq!(p.params.top_k, None);
    }

    #[test]
    fn speaking_feedback_embeds_transcript_and_system_instruction() {
        let p = PromptBuilder::new("en-US").speaking_feedback("I goes to school");
        assert!(p.prompt.contains("\"I goes to school\""));
        let system = p.system_instruction.expect("feedback has a system instruction");
        assert!(system.contains("learners of en-US"));
        assert_eq!(
            p.schema.unwrap().required_keys(),
            vec![
                "pronunciationAndClarity",
                "grammarAndWordChoice",
                "improvedSpokenExample"
            ]
        );
        assert_eq!(p.params.max_output_tokens, 512);
        assert_eq!(p.params.top_k, Some(64));
        assert_eq!(p.params.top_p, Some(0.95));
    }

    #[test]
    fn writing_feedback_declares_three_keys() {
        let p = PromptBuilder::new("es-ES").writing_feedback("Yo soy bien");
        assert!(p.prompt.contains("\"Yo soy bien\""));
        assert!(p.system_instruction.unwrap().contains("written es-ES"));
        assert_eq!(
            p.schema.unwrap().required_keys(),
            vec!["grammarAndSpelling", "vocabularyAndFlow", "improvedWriting"]
        );
    }

    #[test]
    fn sentences_schema_has_array_then_string() {
        let p = PromptBuilder::new("en-US").sentences("borrow");
        let json = p.schema.unwrap().to_json();
        assert_eq!(json["properties"]["sentences"]["type"], "ARRAY");
        assert_eq!(json["properties"]["explanation"]["type"], "STRING");
        assert_eq!(p.params.max_output_tokens, 256);
    }

    #[test]
    fn meaning_uses_its_own_temperature() {
        let p = PromptBuilder::new("en-US").meaning("break a leg");
        assert!(p.prompt.contains("\"break a leg\""));
        assert_eq!(p.params.temperature, Some(0.6));
        assert_eq!(
            p.schema.unwrap().required_keys(),
            vec!["definition", "examples", "context"]
        );
    }

    #[test]
    fn builder_is_pure() {
        let builder = PromptBuilder::new("en-US");
        assert_eq!(builder.meaning("hello"), builder.meaning("hello"));
        assert_eq!(builder.language(), "en-US");
    }
}
