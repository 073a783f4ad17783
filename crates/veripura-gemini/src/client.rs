//! Blocking HTTP client for the generation endpoint.

use tracing::{debug, warn};

use veripura_config::{ApiKey, GeneratorSettings};
use veripura_contracts::error::{VeriPuraError, VeriPuraResult};
use veripura_core::traits::{GenerationRequest, TextGenerator};

use crate::wire::{describe_error_body, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the credential.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// `TextGenerator` over `POST {api_base}/models/{model}:generateContent`.
///
/// Exactly one outbound call per `generate`. No retries.
pub struct GeminiClient {
    agent: ureq::Agent,
    api_base: String,
    model: String,
    api_key: Option<ApiKey>,
}

impl GeminiClient {
    /// Build a client. A missing key is accepted here and reported as
    /// `RequestFailed` on the first request.
    pub fn new(settings: &GeneratorSettings, api_key: Option<ApiKey>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build();
        Self {
            agent,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> VeriPuraResult<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| VeriPuraError::RequestFailed {
            reason: "no API key configured (set GEMINI_API_KEY or API_KEY)".to_string(),
        })?;

        let url = self.endpoint();
        let body = serde_json::to_value(GenerateContentRequest::from_request(request)).map_err(
            |e| VeriPuraError::RequestFailed {
                reason: format!("failed to encode request body: {e}"),
            },
        )?;

        debug!(model = %self.model, "sending generateContent request");
        let response = self
            .agent
            .post(&url)
            .set(API_KEY_HEADER, api_key.expose())
            .send_json(body)
            .map_err(|e| {
                let reason = match e {
                    ureq::Error::Status(code, response) => {
                        let body = response.into_string().unwrap_or_default();
                        format!("HTTP {code}: {}", describe_error_body(&body))
                    }
                    ureq::Error::Transport(transport) => format!("transport error: {transport}"),
                };
                warn!(model = %self.model, %reason, "generateContent request failed");
                VeriPuraError::RequestFailed { reason }
            })?;

        let envelope = response
            .into_json::<GenerateContentResponse>()
            .map_err(|e| VeriPuraError::RequestFailed {
                reason: format!("failed to decode response envelope: {e}"),
            })?;

        envelope.text()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn settings() -> GeneratorSettings {
        GeneratorSettings {
            api_base: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = GeminiClient::new(&settings(), None);
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn missing_key_fails_at_request_time() {
        let client = GeminiClient::new(&settings(), None);
        assert!(!client.has_api_key());

        let request = GenerationRequest {
            prompt: "hello".to_string(),
            response_mime_type: "application/json".to_string(),
            response_schema: json!({ "type": "object" }),
        };
        match client.generate(&request).unwrap_err() {
            VeriPuraError::RequestFailed { reason } => assert!(reason.contains("GEMINI_API_KEY")),
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_host_is_request_failed() {
        let client = GeminiClient::new(
            &GeneratorSettings {
                api_base: "http://127.0.0.1:9".to_string(),
                ..settings()
            },
            Some(ApiKey::new("test-key")),
        );
        let request = GenerationRequest {
            prompt: "hello".to_string(),
            response_mime_type: "application/json".to_string(),
            response_schema: json!({ "type": "object" }),
        };
        let err = client.generate(&request).unwrap_err();
        assert!(matches!(err, VeriPuraError::RequestFailed { .. }));
    }
}
