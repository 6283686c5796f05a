//! Configuration module for FluentFlow.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the Gemini
//! connection, per-feature models, tutor languages and recording limits,
//! `AppPaths` for the platform config directory, and TOML persistence via
//! `AppConfig::load_from` / `AppConfig::save_to`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, GeminiConfig, LanguageOption, ModelConfig, RecordingConfig, TutorConfig,
    API_KEY_ENV_VARS,
};
