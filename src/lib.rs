//! FluentFlow: a language tutor backed by the Gemini API.
//!
//! * [`tutor`] — feature gateways: prompts, one request per operation,
//!   tolerant JSON extraction and typed records.
//! * [`gemini`] — the `generateContent` transport behind a trait seam.
//! * [`audio`] — microphone capture and WAV clips for transcription.
//! * [`view`] — per-view state and terminal rendering of feedback cards.
//! * [`config`] — `settings.toml` persistence.
//! * [`cli`] — command-line arguments.

pub mod audio;
pub mod cli;
pub mod config;
pub mod gemini;
pub mod tutor;
pub mod view;
