use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::error::{AnalysisError, RequestFailure};

/// Response fields that may carry the analysis prose, in lookup order
pub const ANALYSIS_FIELDS: [&str; 4] = ["analysis_text", "ai_analysis", "summary", "output"];

/// Response field whose string value may itself be a JSON document
pub const NESTED_FIELD: &str = "fullOutput";

/// Turns ingredient text into analysis prose
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Returns the analysis prose for `message`.
    async fn analyze(&self, message: &str) -> Result<String, AnalysisError>;
}

/// Client for a webhook that accepts `{ "message": ... }` and answers with JSON
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::BuilderError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(WebhookClient {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, AnalysisError> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify(&self, err: reqwest::Error) -> AnalysisError {
        let failure = if err.is_timeout() {
            RequestFailure::TimedOut
        } else if err.is_connect() {
            RequestFailure::Unreachable(self.url.clone())
        } else if let Some(status) = err.status() {
            RequestFailure::Status(status.as_u16())
        } else {
            RequestFailure::InvalidResponse(err.to_string())
        };

        warn!("Analysis request to {} failed: {}", self.url, err);
        AnalysisError::AnalysisRequestFailed(failure)
    }
}

#[async_trait]
impl AnalysisService for WebhookClient {
    async fn analyze(&self, message: &str) -> Result<String, AnalysisError> {
        debug!("Sending {} characters to {}", message.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Analysis service responded with status {}", status);
            return Err(AnalysisError::AnalysisRequestFailed(RequestFailure::Status(
                status.as_u16(),
            )));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let data: Value = serde_json::from_str(&body).map_err(|e| {
            AnalysisError::AnalysisRequestFailed(RequestFailure::InvalidResponse(e.to_string()))
        })?;
        debug!("Analysis service response: {:?}", data);

        let text = resolve_analysis_text(&data).ok_or(AnalysisError::NoAnalysisData)?;
        info!("Received {} characters of analysis text", text.len());
        Ok(text)
    }
}

/// Finds the analysis prose in a service response.
///
/// The first non-blank string among [`ANALYSIS_FIELDS`] wins. When
/// [`NESTED_FIELD`] holds a string, it is parsed as JSON and searched for the
/// same fields, keeping the top-level text if none match; a string that is not
/// JSON is taken as the analysis text itself.
pub fn resolve_analysis_text(data: &Value) -> Option<String> {
    let top_level = first_text_field(data).map(str::to_string);

    let nested = data
        .get(NESTED_FIELD)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty());

    let resolved = match nested {
        Some(nested) => match serde_json::from_str::<Value>(nested) {
            Ok(parsed) => first_text_field(&parsed).map(str::to_string).or(top_level),
            Err(_) => {
                debug!("'{}' is not JSON, using it verbatim", NESTED_FIELD);
                Some(nested.to_string())
            }
        },
        None => top_level,
    };

    resolved.filter(|text| !text.trim().is_empty())
}

fn first_text_field(data: &Value) -> Option<&str> {
    ANALYSIS_FIELDS
        .iter()
        .filter_map(|field| data.get(field).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
}
