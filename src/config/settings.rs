//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Every section is `#[serde(default)]`, so a settings file only needs the
//! keys the user wants to override.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Environment variables consulted (in order) for the Gemini API key when the
/// settings file does not carry one.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

// ---------------------------------------------------------------------------
// GeminiConfig
// ---------------------------------------------------------------------------

/// Connection settings for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL of the API, without the `/v1beta/...` path.
    pub base_url: String,
    /// API key. `None` means "read it from the environment at call time".
    pub api_key: Option<String>,
    /// Maximum seconds to wait for a reply before the request fails.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key: a non-empty `api_key` from the settings file wins,
    /// then the first non-empty variable of [`API_KEY_ENV_VARS`] as reported
    /// by `lookup`.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Some(key.to_string());
            }
        }
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Model identifier used by each tutor feature.
///
/// Quick text tasks default to the flash model; the two feedback features
/// default to the larger pro model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub transcription: String,
    pub scenario: String,
    pub speaking_feedback: String,
    pub writing_feedback: String,
    pub sentence_builder: String,
    pub meaning_context: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            transcription: "gemini-2.5-flash".into(),
            scenario: "gemini-2.5-flash".into(),
            speaking_feedback: "gemini-3-pro-preview".into(),
            writing_feedback: "gemini-3-pro-preview".into(),
            sentence_builder: "gemini-2.5-flash".into(),
            meaning_context: "gemini-2.5-flash".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TutorConfig
// ---------------------------------------------------------------------------

/// A selectable practice language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageOption {
    /// Display name, e.g. `"Spanish (Spain)"`.
    pub name: String,
    /// Language code sent to the model, e.g. `"es-ES"`.
    pub code: String,
}

impl LanguageOption {
    fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Learner-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// Language code used when `--language` is not given.
    pub default_language: String,
    /// Languages offered by `fluent-flow languages`.
    pub languages: Vec<LanguageOption>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            default_language: "en-US".into(),
            languages: vec![
                LanguageOption::new("English (US)", "en-US"),
                LanguageOption::new("Spanish (Spain)", "es-ES"),
                LanguageOption::new("French (France)", "fr-FR"),
                LanguageOption::new("German (Germany)", "de-DE"),
            ],
        }
    }
}

impl TutorConfig {
    /// Look up a configured language by code (case-insensitive).
    pub fn find_language(&self, code: &str) -> Option<&LanguageOption> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }

    /// Display name for `code`, or the code itself when it is not configured.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.find_language(code)
            .map(|lang| lang.name.as_str())
            .unwrap_or(code)
    }
}

// ---------------------------------------------------------------------------
// RecordingConfig
// ---------------------------------------------------------------------------

/// Microphone capture limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Recording stops automatically once this many seconds are captured.
    pub max_duration_secs: f32,
    /// Sample rate of the encoded clip sent for transcription.
    pub sample_rate: u32,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 20.0,
            sample_rate: 16_000,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use fluent_flow::config::{AppConfig, AppPaths};
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load_from(&AppPaths::new().settings_file).unwrap();
/// assert!(!config.tutor.default_language.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini connection settings.
    pub gemini: GeminiConfig,
    /// Per-feature model identifiers.
    pub models: ModelConfig,
    /// Languages and defaults.
    pub tutor: TutorConfig,
    /// Microphone capture limits.
    pub recording: RecordingConfig,
}

impl AppConfig {
    /// Load from `path` (usually `AppPaths::settings_file`).
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
