//! Request and reply types for the Gemini `generateContent` endpoint.
//!
//! [`GenerationRequest`] is the crate-level description of one call (model,
//! prompt parts, sampling parameters, optional schema).  It is converted into
//! the camelCase wire body [`GenerateContentRequest`] by
//! [`GenerationRequest::to_wire`].

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::schema::Schema;

// ---------------------------------------------------------------------------
// Crate-level request
// ---------------------------------------------------------------------------

/// Sampling / length controls for a single generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
}

impl GenerationParams {
    /// Only a token cap; the service picks its default sampling.
    pub fn capped(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens,
            temperature: None,
            top_k: None,
            top_p: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_k_top_p(mut self, top_k: u32, top_p: f32) -> Self {
        self.top_k = Some(top_k);
        self.top_p = Some(top_p);
        self
    }
}

/// Everything needed to issue one `generateContent` call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model identifier, e.g. `"gemini-2.5-flash"`.
    pub model: String,
    pub system_instruction: Option<String>,
    /// Content parts of the single user turn.
    pub parts: Vec<Part>,
    pub params: GenerationParams,
    /// When set, the reply is requested as `application/json` with this schema.
    pub schema: Option<Schema>,
}

impl GenerationRequest {
    /// Build the JSON body sent to the service.
    pub fn to_wire(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: self.parts.clone(),
            }],
            system_instruction: self.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part::text(text.clone())],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: self.params.max_output_tokens,
                temperature: self.params.temperature,
                top_k: self.params.top_k,
                top_p: self.params.top_p,
                response_mime_type: self.schema.as_ref().map(|_| "application/json".into()),
                response_schema: self.schema.as_ref().map(Schema::to_json),
            },
        }
    }

    /// Short description for diagnostic logs (no audio payload).
    pub fn summary(&self) -> String {
        let text: Vec<&str> = self.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let inline_bytes: usize = self
            .parts
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.len())
            .sum();
        format!(
            "model={} json={} inline_b64_len={} prompt={:?}",
            self.model,
            self.schema.is_some(),
            inline_bytes,
            text.join("\n")
        )
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content part: either text or inline binary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline binary payload, base64-encoded as the service expects.
    pub fn inline(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded).
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Reply body of `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, trimmed.
    ///
    /// Returns an empty string when the service produced no candidate or no
    /// text.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Why the prompt was blocked, if it was.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_request() -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash".into(),
            system_instruction: Some("You are a tutor.".into()),
            parts: vec![Part::text("Say hi")],
            params: GenerationParams::capped(512)
                .with_temperature(0.7)
                .with_top_k_top_p(64, 0.95),
            schema: Some(Schema::object([("scenario", Schema::string())])),
        }
    }

    #[test]
    fn wire_body_uses_camel_case_generation_config() {
        let body = serde_json::to_value(json_request().to_wire()).unwrap();
        let config = &body["generationConfig"];

        assert_eq!(config["maxOutputTokens"], 512);
        assert_eq!(config["topK"], 64);
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert!((config["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a tutor.");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hi");
    }

    #[test]
    fn plain_text_request_omits_optional_fields() {
        let request = GenerationRequest {
            model: "gemini-2.5-flash".into(),
            system_instruction: None,
            parts: vec![Part::text("Transcribe")],
            params: GenerationParams::capped(256),
            schema: None,
        };
        let body = serde_json::to_value(request.to_wire()).unwrap();

        assert!(body.get("systemInstruction").is_none());
        assert_eq!(body["generationConfig"], json!({ "maxOutputTokens": 256 }));
    }

    #[test]
    fn inline_part_is_base64_encoded() {
        let part = Part::inline("audio/wav", b"RIFF");
        let value = serde_json::to_value(&part).unwrap();

        assert_eq!(value["inlineData"]["mimeType"], "audio/wav");
        assert_eq!(value["inlineData"]["data"], "UklGRg==");
        assert!(value.get("text").is_none());
    }

    #[test]
    fn reply_text_joins_first_candidate_parts() {
        let reply: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": " {\"a\":" }, { "text": "1} " }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(reply.text(), "{\"a\":1}");
    }

    #[test]
    fn reply_without_candidates_is_empty_text() {
        let reply: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        assert_eq!(reply.text(), "");
        assert_eq!(reply.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn summary_reports_payload_size_not_payload() {
        let request = GenerationRequest {
            model: "m".into(),
            system_instruction: None,
            parts: vec![Part::text("hello"), Part::inline("audio/wav", &[0u8; 3])],
            params: GenerationParams::capped(1),
            schema: None,
        };
        let summary = request.summary();
        assert!(summary.contains("inline_b64_len=4"));
        assert!(summary.contains("hello"));
    }
}
