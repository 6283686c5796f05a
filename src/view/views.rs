//! The four practice views.
//!
//! Each view owns its [`ViewState`]s, drives the matching [`Tutor`]
//! operations and turns its state into [`FeedbackCard`]s.  Views hold no
//! reference to one another.

use std::future::Future;

use crate::audio::AudioClip;
use crate::tutor::{
    Feedback, GatewayError, MeaningResponse, ScenarioResponse, SentenceResponse, Tutor,
    WritingFeedback,
};

use super::content::{CardContent, FeedbackCard};
use super::state::ViewState;

/// Issue one request against `state`, applying the outcome if still current.
async fn track<T, F>(state: &mut ViewState<T>, request: F) -> bool
where
    F: Future<Output = Result<T, GatewayError>>,
{
    let ticket = state.begin();
    let result = request.await;
    state.complete(ticket, result)
}

fn text(value: &str) -> Option<CardContent> {
    Some(CardContent::Text(value.to_string()))
}

/// Scenario banner shared by the speaking and writing views.
pub fn scenario_line(scenario: &ViewState<ScenarioResponse>) -> String {
    if scenario.is_loading() {
        return "Loading a new scenario...".to_string();
    }
    match scenario.response() {
        Some(r) => format!("Scenario: {}", r.scenario),
        None if scenario.error().is_some() => "Failed to load scenario.".to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Speaking
// ---------------------------------------------------------------------------

/// Scenario → record → transcribe → feedback.
#[derive(Default)]
pub struct SpeakingView {
    pub scenario: ViewState<ScenarioResponse>,
    pub transcription: ViewState<String>,
    pub feedback: ViewState<Feedback>,
}

impl SpeakingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a fresh scenario and clear the previous round.
    pub async fn load_scenario(&mut self, tutor: &Tutor, language: &str) {
        self.transcription.reset();
        self.feedback.reset();
        track(&mut self.scenario, tutor.generate_scenario(language)).await;
    }

    /// Transcribe `clip`, then request feedback on the transcript.
    ///
    /// An empty transcript ends the round with "No speech detected" and no
    /// feedback request.
    pub async fn submit_clip(&mut self, tutor: &Tutor, clip: &AudioClip, language: &str) {
        self.feedback.reset();
        track(&mut self.transcription, tutor.transcribe_audio(clip, language)).await;

        let Some(transcript) = self.transcription.response().cloned() else {
            return;
        };
        track(&mut self.feedback, async {
            tutor
                .speaking_feedback(&transcript, language)
                .await
                .map(|fb| Feedback::new(transcript.as_str(), fb))
        })
        .await;
    }

    /// The message to show, most recent stage first.
    pub fn error(&self) -> Option<&str> {
        self.feedback
            .error()
            .or_else(|| self.transcription.error())
            .or_else(|| self.scenario.error())
    }

    pub fn cards(&self) -> Vec<FeedbackCard> {
        let fb = self.feedback.response();
        let analyzing = self.feedback.is_loading();
        vec![
            FeedbackCard::filled_or(
                "What You Said (Transcription)",
                self.transcription.response().and_then(|t| text(t)),
                self.transcription.is_loading(),
                "Transcribing your speech...",
                "No speech recorded yet.",
            ),
            FeedbackCard::filled_or(
                "Pronunciation & Clarity",
                fb.and_then(|f| text(&f.pronunciation_and_clarity)),
                analyzing,
                "Analyzing pronunciation...",
                "Speak to get feedback!",
            ),
            FeedbackCard::filled_or(
                "Grammar & Word Choice",
                fb.and_then(|f| text(&f.grammar_and_word_choice)),
                analyzing,
                "Checking grammar and word choice...",
                "Speak to get feedback!",
            ),
            FeedbackCard::filled_or(
                "Improved Spoken Example",
                fb.and_then(|f| text(&f.improved_spoken_example)),
                analyzing,
                "Generating an improved example...",
                "Speak to get feedback!",
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct WritingView {
    pub scenario: ViewState<ScenarioResponse>,
    pub feedback: ViewState<WritingFeedback>,
}

impl WritingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load_scenario(&mut self, tutor: &Tutor, language: &str) {
        self.feedback.reset();
        track(&mut self.scenario, tutor.generate_scenario(language)).await;
    }

    pub async fn submit(&mut self, tutor: &Tutor, written: &str, language: &str) {
        let ticket = self.feedback.begin();
        self.feedback.input = written.to_string();
        let result = tutor.writing_feedback(written, language).await;
        self.feedback.complete(ticket, result);
    }

    pub fn error(&self) -> Option<&str> {
        self.feedback.error().or_else(|| self.scenario.error())
    }

    pub fn cards(&self) -> Vec<FeedbackCard> {
        let fb = self.feedback.response();
        let analyzing = self.feedback.is_loading();
        let written = &self.feedback.input;
        vec![
            FeedbackCard::filled_or(
                "Your Writing",
                Some(CardContent::Prebuilt(
                    written.lines().map(str::to_string).collect(),
                )),
                false,
                "",
                "Start writing your response to the scenario above.",
            ),
            FeedbackCard::filled_or(
                "Grammar & Spelling",
                fb.and_then(|f| text(&f.grammar_and_spelling)),
                analyzing,
                "Analyzing grammar and spelling...",
                "Feedback will appear here.",
            ),
            FeedbackCard::filled_or(
                "Vocabulary & Flow",
                fb.and_then(|f| text(&f.vocabulary_and_flow)),
                analyzing,
                "Analyzing vocabulary and flow...",
                "Feedback will appear here.",
            ),
            FeedbackCard::filled_or(
                "Improved Writing Example",
                fb.and_then(|f| text(&f.improved_writing)),
                analyzing,
                "Generating improved example...",
                "An improved version of your text.",
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Sentence builder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SentenceView {
    pub state: ViewState<SentenceResponse>,
}

impl SentenceView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, tutor: &Tutor, word: &str, language: &str) {
        let ticket = self.state.begin();
        self.state.input = word.to_string();
        let result = tutor.build_sentences(word, language).await;
        self.state.complete(ticket, result);
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn cards(&self) -> Vec<FeedbackCard> {
        let reply = self.state.response();
        let loading = self.state.is_loading();
        vec![
            FeedbackCard::filled_or(
                format!("Sentences for \"{}\"", self.state.input),
                reply.map(|r| CardContent::TextList(r.sentences.clone())),
                loading,
                "Generating sentences...",
                "Enter a word to build sentences.",
            ),
            FeedbackCard::filled_or(
                "Usage Explanation",
                reply.and_then(|r| text(&r.explanation)),
                loading,
                "Explaining usage...",
                "Explanation will appear here.",
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Meaning & context
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MeaningView {
    pub state: ViewState<MeaningResponse>,
}

impl MeaningView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, tutor: &Tutor, query: &str, language: &str) {
        let ticket = self.state.begin();
        self.state.input = query.to_string();
        let result = tutor.meaning_and_context(query, language).await;
        self.state.complete(ticket, result);
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn cards(&self) -> Vec<FeedbackCard> {
        let reply = self.state.response();
        let loading = self.state.is_loading();
        vec![
            FeedbackCard::filled_or(
                format!("Meaning of \"{}\"", self.state.input),
                reply.and_then(|r| text(&r.definition)),
                loading,
                "Getting definition...",
                "Enter a word for its meaning.",
            ),
            FeedbackCard::filled_or(
                "Example Sentences",
                reply.map(|r| CardContent::TextList(r.examples.clone())),
                loading,
                "Getting examples...",
                "Examples will appear here.",
            ),
            FeedbackCard::filled_or(
                "Context & Nuances",
                reply.and_then(|r| text(&r.context)),
                loading,
                "Getting context...",
                "Contextual explanation will appear here.",
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
