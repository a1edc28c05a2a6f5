use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

use super::OcrEngine;
use crate::config::OcrConfig;

const GOOGLE_VISION_URL: &str = "https://vision.googleapis.com";

/// Represents the source of an image for OCR processing
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded data
    Base64(String),
    /// Image as a `data:image/...;base64,...` URL, as produced by browsers
    DataUrl(String),
}

impl ImageSource {
    /// Base64 payload of the image, reading the file for [`ImageSource::Path`]
    pub async fn to_base64(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        match self {
            ImageSource::Path(path) => {
                let image_data = tokio::fs::read(path).await?;
                Ok(STANDARD.encode(&image_data))
            }
            ImageSource::Base64(data) => Ok(data.clone()),
            ImageSource::DataUrl(url) => Ok(data_url_payload(url)?.to_string()),
        }
    }

    /// Short description for logs, never the image data itself
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Path(path) => path.clone(),
            ImageSource::Base64(_) => "base64-image".to_string(),
            ImageSource::DataUrl(_) => "data-url-image".to_string(),
        }
    }
}

/// Extracts the base64 payload from a data URL
fn data_url_payload(url: &str) -> Result<&str, Box<dyn Error + Send + Sync>> {
    let rest = url
        .strip_prefix("data:")
        .ok_or("Image data URL must start with 'data:'")?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or("Image data URL has no payload")?;

    if !header.ends_with(";base64") {
        return Err("Image data URL must be base64-encoded".into());
    }
    if payload.is_empty() {
        return Err("Image data URL has an empty payload".into());
    }

    Ok(payload)
}

/// OCR through the Google Cloud Vision `images:annotate` endpoint
pub struct GoogleVisionOcr {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleVisionOcr {
    /// Create a new engine from configuration
    pub fn new(config: &OcrConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY environment variable not set")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GOOGLE_VISION_URL.to_string());

        Ok(Self::with_base_url(api_key, base_url))
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        GoogleVisionOcr {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl OcrEngine for GoogleVisionOcr {
    fn engine_name(&self) -> &str {
        "google_vision"
    }

    async fn recognize(
        &self,
        image: &ImageSource,
        language: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let base64_image = image.to_base64().await?;

        let url = format!(
            "{}/v1/images:annotate?key={}",
            self.base_url, self.api_key
        );

        let request_body = json!({
            "requests": [{
                "image": {
                    "content": base64_image
                },
                "features": [{
                    "type": "TEXT_DETECTION"
                }],
                "imageContext": {
                    "languageHints": [language]
                }
            }]
        });

        debug!("Sending OCR request for {} to Google Vision API", image.describe());

        let response = self
            .client
            .post(&url)
            .header("Accept-Encoding", "identity")
            .json(&request_body)
            .send()
            .await?;

        // Check for HTTP errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Google Vision API error ({}): {}", status, error_text).into());
        }

        let response_body: Value = response.json().await?;

        // The API returns all detected text in the full text annotation
        let text = response_body["responses"][0]["fullTextAnnotation"]["text"]
            .as_str()
            .ok_or("No text found in image")?
            .to_string();

        if text.trim().is_empty() {
            return Err("No text detected in image".into());
        }

        debug!("Extracted text from image: {} characters", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_data_url_payload() {
        assert_eq!(
            data_url_payload("data:image/jpeg;base64,/9j/4AAQ").unwrap(),
            "/9j/4AAQ"
        );
        assert!(data_url_payload("image/jpeg;base64,/9j/4AAQ").is_err());
        assert!(data_url_payload("data:image/jpeg,/9j/4AAQ").is_err());
        assert!(data_url_payload("data:image/jpeg;base64,").is_err());
        assert!(data_url_payload("data:image/jpeg;base64").is_err());
    }

    #[tokio::test]
    async fn test_to_base64_variants() {
        let raw = ImageSource::Base64("aGVsbG8=".to_string());
        assert_eq!(raw.to_base64().await.unwrap(), "aGVsbG8=");

        let url = ImageSource::DataUrl("data:image/png;base64,aGVsbG8=".to_string());
        assert_eq!(url.to_base64().await.unwrap(), "aGVsbG8=");

        let missing = ImageSource::Path("/nonexistent/label.jpg".to_string());
        assert!(missing.to_base64().await.is_err());
    }

    #[test]
    fn test_requires_api_key() {
        let original_key = std::env::var("GOOGLE_API_KEY").ok();
        std::env::remove_var("GOOGLE_API_KEY");

        let result = GoogleVisionOcr::new(&OcrConfig::default());
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("GOOGLE_API_KEY"));

        // Restore original key if it existed
        if let Some(key) = original_key {
            std::env::set_var("GOOGLE_API_KEY", key);
        }
    }

    #[tokio::test]
    async fn test_recognize() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#""content":"aGVsbG8=""#.to_string()),
                Matcher::Regex(r#""languageHints":\["en"\]"#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"responses": [{"fullTextAnnotation": {"text": "INGREDIENTS: Sugar,\nSalt"}}]}"#,
            )
            .create_async()
            .await;

        let ocr = GoogleVisionOcr::with_base_url("test-key".to_string(), server.url());
        let text = ocr
            .recognize(&ImageSource::Base64("aGVsbG8=".to_string()), "en")
            .await
            .unwrap();

        assert_eq!(text, "INGREDIENTS: Sugar,\nSalt");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_recognize_no_text() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"responses": [{}]}"#)
            .create_async()
            .await;

        let ocr = GoogleVisionOcr::with_base_url("test-key".to_string(), server.url());
        let result = ocr
            .recognize(&ImageSource::Base64("aGVsbG8=".to_string()), "en")
            .await;

        assert!(result.unwrap_err().to_string().contains("No text found"));
    }

    #[tokio::test]
    async fn test_recognize_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/images:annotate")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let ocr = GoogleVisionOcr::with_base_url("bad-key".to_string(), server.url());
        let result = ocr
            .recognize(&ImageSource::Base64("aGVsbG8=".to_string()), "en")
            .await;

        assert!(result.unwrap_err().to_string().contains("403"));
    }
}
