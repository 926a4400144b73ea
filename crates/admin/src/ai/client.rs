//! Anthropic messages API client with model fallback.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::AnthropicConfig;

use super::error::{AiError, ApiErrorResponse};
use super::types::{Message, MessagesRequest, MessagesResponse, SuggestedUnit};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Models tried in order. The first is the default; the rest absorb
/// model deprecations and overload errors without a deploy.
const MODEL_FALLBACKS: &[&str] = &[
    "claude-sonnet-4-5",
    "claude-3-7-sonnet-latest",
    "claude-3-5-haiku-latest",
];

/// Client for the AI content helpers.
#[derive(Clone)]
pub struct AiClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    api_key: SecretString,
}

impl AiClient {
    /// Create a new client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AnthropicConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                api_key: config.api_key.clone(),
            }),
        })
    }

    /// Draft a product description for the given name and category.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if every fallback model fails.
    #[instrument(skip(self))]
    pub async fn draft_description(
        &self,
        name: &str,
        category: &str,
        keywords: &[String],
    ) -> Result<String, AiError> {
        let mut prompt = format!(
            "Write a product description for an online agricultural products store.\n\
             Product name: {name}\n\
             Category: {category}\n"
        );
        if !keywords.is_empty() {
            prompt.push_str(&format!("Keywords to work in: {}\n", keywords.join(", ")));
        }
        prompt.push_str(
            "Keep it to 2-3 short paragraphs, plain text, no headings. \
             Focus on freshness, origin, and practical use. \
             Respond with the description only.",
        );

        let text = self.complete(prompt).await?;
        Ok(text.trim().to_string())
    }

    /// Suggest priced units (e.g. "5 kg bag") for a product.
    ///
    /// The model is asked for a bare JSON array; any surrounding prose is
    /// stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns `AiError::Parse` if the output contains no valid array.
    #[instrument(skip(self))]
    pub async fn suggest_units(
        &self,
        name: &str,
        category: &str,
    ) -> Result<Vec<SuggestedUnit>, AiError> {
        let prompt = format!(
            "Suggest 3-5 retail packaging units with prices in Indian Rupees for \
             this agricultural product.\n\
             Product name: {name}\n\
             Category: {category}\n\
             Respond with only a JSON array of objects with keys \"label\" \
             (e.g. \"5 kg bag\") and \"price\" (a decimal string, e.g. \"450.00\"). \
             No other text."
        );

        let text = self.complete(prompt).await?;
        parse_units(&text)
    }

    /// Send a single-turn prompt, walking the model fallback list.
    async fn complete(&self, prompt: String) -> Result<String, AiError> {
        let mut last_error = None;

        for model in MODEL_FALLBACKS {
            match self.send(model, &prompt).await {
                Ok(response) => {
                    let text = response.text();
                    if text.is_empty() {
                        last_error = Some(AiError::Parse("empty response".to_string()));
                        continue;
                    }
                    return Ok(text);
                }
                // A bad key won't get better on another model
                Err(AiError::Unauthorized) => return Err(AiError::Unauthorized),
                Err(e) => {
                    tracing::warn!(model, error = %e, "AI model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AiError::Parse("no models configured".to_string())))
    }

    async fn send(&self, model: &str, prompt: &str) -> Result<MessagesResponse, AiError> {
        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .inner
            .client
            .post(API_URL)
            .header("x-api-key", self.inner.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(parsed) => AiError::Api {
                    error_type: parsed.error.error_type,
                    message: parsed.error.message,
                },
                Err(_) => AiError::Api {
                    error_type: status.as_u16().to_string(),
                    message: body,
                },
            });
        }

        Ok(response.json::<MessagesResponse>().await?)
    }
}

/// Extract and parse the first JSON array in the model's output.
fn parse_units(text: &str) -> Result<Vec<SuggestedUnit>, AiError> {
    let start = text
        .find('[')
        .ok_or_else(|| AiError::Parse("no JSON array in response".to_string()))?;
    let end = text
        .rfind(']')
        .ok_or_else(|| AiError::Parse("unterminated JSON array in response".to_string()))?;
    if end < start {
        return Err(AiError::Parse("malformed JSON array in response".to_string()));
    }

    serde_json::from_str::<Vec<SuggestedUnit>>(&text[start..=end])
        .map_err(|e| AiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units_bare_array() {
        let units = parse_units(r#"[{"label": "1 kg pack", "price": "120.00"}]"#).expect("parse");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].label, "1 kg pack");
    }

    #[test]
    fn test_parse_units_with_surrounding_prose() {
        let text = "Here are some suggestions:\n\
            [{\"label\": \"500 g jar\", \"price\": \"90.00\"}, \
             {\"label\": \"1 kg jar\", \"price\": \"160.00\"}]\n\
            Let me know if you need more.";
        let units = parse_units(text).expect("parse");
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn test_parse_units_no_array() {
        assert!(matches!(
            parse_units("Sorry, I can't help with that."),
            Err(AiError::Parse(_))
        ));
    }
}
