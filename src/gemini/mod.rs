//! Gemini transport layer.
//!
//! This module provides:
//! * [`GenerationClient`] — async trait the tutor gateways call.
//! * [`GeminiClient`] — reqwest implementation for `generateContent`.
//! * [`GenerationRequest`] / [`GenerationParams`] / [`Part`] — one call's
//!   model, prompt parts and sampling controls, plus the wire types.
//! * [`Schema`] — declarative response shape.
//! * [`TransportError`] — network-level failures.

pub mod client;
pub mod request;
pub mod schema;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiClient, GenerationClient, TransportError};
pub use request::{
    GenerateContentRequest, GenerateContentResponse, GenerationParams, GenerationRequest,
    InlineData, Part,
};
pub use schema::{Schema, SchemaKind};
