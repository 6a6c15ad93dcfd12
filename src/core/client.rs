use crate::core::{Payload, PredictionResult, PredictionService, Result};
use crate::utils::error::FormError;
use crate::utils::validation::validate_url;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

pub struct HttpPredictionClient {
    endpoint: String,
    client: Client,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_url("endpoint", &endpoint)?;
        Ok(Self {
            endpoint,
            client: Client::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpPredictionClient {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, payload: &Payload) -> Result<PredictionResult> {
        let body = serde_json::to_vec(payload)?;

        tracing::debug!("POST {} ({} fields)", self.endpoint, payload.len());
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);

        let text = response.text().await?;
        interpret_response(status.as_u16(), status.is_success(), &text)
    }
}

fn interpret_response(status: u16, success: bool, text: &str) -> Result<PredictionResult> {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) if success => {
            return Err(FormError::InvalidResponse {
                message: format!("response is not valid JSON: {}", e),
            })
        }
        Err(_) => {
            return Err(FormError::HttpStatus {
                status,
                body: text.to_string(),
            })
        }
    };

    // 服務端失敗時回傳 {"error": "..."}
    if let Some(message) = parsed.get("error").and_then(Value::as_str) {
        return Err(FormError::ServiceError {
            status,
            message: message.to_string(),
        });
    }

    if !success {
        return Err(FormError::HttpStatus {
            status,
            body: text.to_string(),
        });
    }

    match parsed {
        Value::Object(fields) => Ok(PredictionResult::from_map(fields)),
        other => Err(FormError::InvalidResponse {
            message: format!("expected a JSON object, got {}", other),
        }),
    }
}
