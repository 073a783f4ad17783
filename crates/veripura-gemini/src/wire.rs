//! Wire types for `models/{model}:generateContent`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use veripura_contracts::error::{VeriPuraError, VeriPuraResult};
use veripura_core::traits::GenerationRequest;

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    /// One user turn carrying the prompt, with the reply constrained to the
    /// request's MIME type and schema.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_mime_type.clone(),
                response_schema: to_gemini_schema(&request.response_schema),
            },
        }
    }
}

/// Translate a JSON Schema document into Gemini's schema dialect.
///
/// Gemini spells types in upper case and accepts only a subset of keywords.
/// `type`, `properties`, `items`, `required`, `description` and `enum` are
/// carried over; anything else is dropped.
pub fn to_gemini_schema(schema: &Value) -> Value {
    let Some(object) = schema.as_object() else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in object {
        match key.as_str() {
            "type" => {
                if let Some(ty) = value.as_str() {
                    out.insert(key.clone(), Value::String(ty.to_ascii_uppercase()));
                }
            }
            "properties" => {
                if let Some(properties) = value.as_object() {
                    let converted = properties
                        .iter()
                        .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                        .collect();
                    out.insert(key.clone(), Value::Object(converted));
                }
            }
            "items" => {
                out.insert(key.clone(), to_gemini_schema(value));
            }
            "required" | "description" | "enum" => {
                out.insert(key.clone(), value.clone());
            }
            _ => {}
        }
    }
    Value::Object(out)
}

// ── Response ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
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
    /// Concatenated text of the first candidate.
    ///
    /// # Errors
    ///
    /// `RequestFailed` when there is no candidate (blocked prompt or empty
    /// reply) or the candidate carries no text.
    pub fn text(&self) -> VeriPuraResult<String> {
        let Some(candidate) = self.candidates.first() else {
            let reason = match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                Some(block) => format!("prompt blocked: {block}"),
                None => "response contained no candidates".to_string(),
            };
            return Err(VeriPuraError::RequestFailed { reason });
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(VeriPuraError::RequestFailed {
                reason: format!(
                    "candidate contained no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }
        Ok(text)
    }
}

/// `{"error": {"code", "message", "status"}}` as returned with non-2xx codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Best-effort description of an error response body.
pub fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(200).collect(),
    }
}
