//! reqwest-based transport.

use crate::StatusFetcher;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, error, instrument};
use uploadpost_core::{
    Attachment, AuthScheme, Credentials, MediaItem, Method, Operation, Payload, PayloadBuilder,
    PayloadKind, PayloadValue, UploadRequest,
};
use uploadpost_error::{HttpError, HttpErrorKind};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.upload-post.com/api";

const STATUS_PATH: &str = "/uploadposts/status";

/// Client for the Upload-Post REST API.
#[derive(Debug, Clone)]
pub struct UploadPostClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl UploadPostClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(credentials, base_url), fields(url = %base_url.as_ref()))]
    pub fn new(
        credentials: Credentials,
        base_url: impl AsRef<str>,
        request_timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| HttpError::new(HttpErrorKind::Request(e.to_string())))?;
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();

        debug!(url = %base_url, "Created Upload-Post client");

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the stored credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not JSON.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, request: &UploadRequest) -> Result<JsonValue, HttpError> {
        let url = format!("{}{}", self.base_url, request.path());
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.payload_kind() {
            PayloadKind::JsonBody => builder.json(&request.payload().to_json()),
            PayloadKind::QueryString => {
                let pairs = request.payload().to_query_pairs();
                if pairs.is_empty() {
                    builder
                } else {
                    builder.query(&pairs)
                }
            }
            PayloadKind::MultipartForm => builder.multipart(to_form(request.payload())?),
        };

        debug!(url = %url, keys = request.payload().len(), "Sending request");

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            HttpError::new(HttpErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            HttpError::new(HttpErrorKind::Request(e.to_string()))
        })?;

        if !status.is_success() {
            error!(status = %status, body = %text, "API error");
            return Err(HttpError::new(HttpErrorKind::Status {
                status: status.as_u16(),
                body: text,
            }));
        }

        if text.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            HttpError::new(HttpErrorKind::Decode(e.to_string()))
        })
    }
}

#[async_trait]
impl StatusFetcher for UploadPostClient {
    async fn fetch_status(&self, request_id: &str) -> Result<JsonValue, HttpError> {
        let payload = PayloadBuilder::new()
            .with("request_id", request_id)
            .freeze(PayloadKind::QueryString);
        let request = UploadRequest::new(
            Operation::GetStatus,
            Method::Get,
            STATUS_PATH,
            AuthScheme::ApiKey,
            self.credentials.api_key(),
            PayloadKind::QueryString,
            payload,
        );
        self.send(&request).await
    }
}

/// Encode a payload as multipart form data.
///
/// List values repeat their key once per element; attachments become file
/// parts carrying their file name and MIME type.
fn to_form(payload: &Payload) -> Result<Form, HttpError> {
    let mut form = Form::new();
    for (key, value) in payload.iter() {
        let key = key.to_string();
        form = match value {
            PayloadValue::Text(text) => form.text(key, text.clone()),
            PayloadValue::Bool(flag) => form.text(key, flag.to_string()),
            PayloadValue::Integer(n) => form.text(key, n.to_string()),
            PayloadValue::List(items) => items
                .iter()
                .fold(form, |form, item| form.text(key.clone(), item.clone())),
            PayloadValue::File(file) => form.part(key, file_part(file)?),
            PayloadValue::Media(items) => {
                let mut form = form;
                for item in items {
                    form = match item {
                        MediaItem::Url(url) => form.text(key.clone(), url.clone()),
                        MediaItem::File(file) => form.part(key.clone(), file_part(file)?),
                    };
                }
                form
            }
        };
    }
    Ok(form)
}

fn file_part(file: &Attachment) -> Result<Part, HttpError> {
    let part = Part::bytes(file.bytes().clone()).file_name(file.filename().clone());
    match file.content_type() {
        Some(mime) => part.mime_str(mime).map_err(|e| {
            HttpError::new(HttpErrorKind::Request(format!(
                "Invalid content type '{}' for {}: {}",
                mime,
                file.filename(),
                e
            )))
        }),
        None => Ok(part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: String) -> UploadPostClient {
        UploadPostClient::new(Credentials::new("test-key"), url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_status_sends_query_and_api_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/uploadposts/status")
            .match_query(Matcher::UrlEncoded("request_id".into(), "req-9".into()))
            .match_header("authorization", "ApiKey test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "pending"}"#)
            .create_async()
            .await;

        let body = client(server.url()).fetch_status("req-9").await.unwrap();
        assert_eq!(body, json!({ "status": "pending" }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/uploadposts/status")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("Invalid API key")
            .create_async()
            .await;

        let err = client(server.url()).fetch_status("x").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/uploadposts/status")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client(server.url()).fetch_status("x").await.unwrap_err();
        assert!(matches!(err.kind(), HttpErrorKind::Decode(_)));
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let file = Attachment::new(vec![1], "a.bin", Some("not a mime".to_string()));
        assert!(file_part(&file).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client("https://api.test/api/".to_string());
        assert_eq!(client.base_url(), "https://api.test/api");
    }
}
