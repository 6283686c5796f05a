//! Terminal view layer.
//!
//! This module provides:
//! * [`ViewState`] / [`RequestTicket`] — per-view transient state with
//!   stale-reply protection.
//! * [`SpeakingView`], [`WritingView`], [`SentenceView`], [`MeaningView`] —
//!   one per practice mode, each producing [`FeedbackCard`]s.
//! * [`render`] — plain-text output of cards and errors.

pub mod content;
pub mod render;
pub mod state;
pub mod views;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use content::{CardContent, FeedbackCard};
pub use state::{RequestTicket, ViewState};
pub use views::{scenario_line, MeaningView, SentenceView, SpeakingView, WritingView};
