use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::backend::{Backend, BackendError};

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    target_language_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationEntry {
    #[serde(default)]
    translated_text: String,
}

/// Client for the Cloud Translation v3 `translateText` REST method.
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    project: String,
    location: String,
    access_token: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: String, project: String, location: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            project,
            location,
            access_token,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v3/projects/{}/locations/{}:translateText",
            self.endpoint.trim_end_matches('/'),
            self.project,
            self.location
        )
    }
}

#[async_trait]
impl Backend for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Vec<String>, BackendError> {
        let url = self.url();
        let body = TranslateTextRequest {
            contents: [text],
            mime_type: "text/plain",
            target_language_code: target_language,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("x-goog-user-project", &self.project)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Request(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        parse_response(&payload)
    }
}

fn parse_response(payload: &str) -> Result<Vec<String>, BackendError> {
    let response: TranslateTextResponse =
        serde_json::from_str(payload).map_err(|e| BackendError::Parse(e.to_string()))?;

    Ok(response
        .translations
        .into_iter()
        .map(|t| t.translated_text)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn create_test_client(endpoint: &str) -> GoogleTranslateClient {
        GoogleTranslateClient::new(
            endpoint.to_string(),
            "demo-project".to_string(),
            "global".to_string(),
            "token".to_string(),
        )
    }

    #[test]
    fn test_url_includes_project_and_location() {
        let client = create_test_client("https://translation.googleapis.com/");
        assert_eq!(
            client.url(),
            "https://translation.googleapis.com/v3/projects/demo-project/locations/global:translateText"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = TranslateTextRequest {
            contents: ["Bonjour"],
            mime_type: "text/plain",
            target_language_code: "en",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": ["Bonjour"],
                "mimeType": "text/plain",
                "targetLanguageCode": "en"
            })
        );
    }

    #[test]
    fn test_parse_response_with_translations() {
        let payload = r#"{"translations":[{"translatedText":"Hello","detectedLanguageCode":"fr"}]}"#;
        assert_eq!(parse_response(payload).unwrap(), vec!["Hello".to_string()]);
    }

    #[test]
    fn test_parse_response_without_translations() {
        assert!(parse_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_invalid_json() {
        let err = parse_response("<html>").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }
}
