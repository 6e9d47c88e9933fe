//! `reqwest` implementation of [`OcrBackend`] speaking the service's JSON/multipart API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::engine::{mime_for, OcrBackend, OcrError, OcrRequest};
use crate::result::{EngineCatalog, OcrResult, SupportedLanguages};

/// Base path used by a locally running service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
pub struct HttpOcrBackend {
    client: Client,
    base_url: String,
}

impl HttpOcrBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, OcrError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` bounds each whole request, body included.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, OcrError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, OcrError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = ensure_success(self.client.get(&url).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn ensure_success(response: Response) -> Result<Response, OcrError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(OcrError::Http {
        status: status.as_u16(),
        status_text: status_text(status),
    })
}

/// Reason phrase for `status`, or its class when the code has none.
fn status_text(status: StatusCode) -> String {
    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }
    let class = match status.as_u16() {
        100..=199 => "Informational",
        200..=299 => "Success",
        300..=399 => "Redirection",
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "Unknown Status",
    };
    class.to_string()
}

#[async_trait]
impl OcrBackend for HttpOcrBackend {
    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResult, OcrError> {
        request.validate()?;
        let (file_name, data) = request.input.load().await?;
        let size = data.len();
        let part = Part::bytes(data)
            .file_name(file_name.clone())
            .mime_str(mime_for(&file_name))?;
        let form = Form::new()
            .part("file", part)
            .text("language", request.language.clone())
            .text("engine", request.engine.to_string());

        let url = self.endpoint("ocr");
        debug!(%url, file = %file_name, size, language = %request.language, engine = %request.engine, "POST");
        // Sent both as form fields and as query parameters; services read one or the other.
        let query = [("language", request.language.as_str()), ("engine", request.engine.as_str())];
        let response = ensure_success(self.client.post(&url).query(&query).multipart(form).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn languages(&self) -> Result<SupportedLanguages, OcrError> {
        self.get_json("languages").await
    }

    async fn engines(&self) -> Result<EngineCatalog, OcrError> {
        self.get_json("engines").await
    }

    async fn status(&self) -> Result<(), OcrError> {
        let url = self.endpoint("");
        debug!(%url, "GET");
        ensure_success(self.client.get(&url).send().await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let backend = HttpOcrBackend::new("http://localhost:8000/api/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000/api");
        assert_eq!(backend.endpoint("ocr"), "http://localhost:8000/api/ocr");
        assert_eq!(backend.endpoint(""), "http://localhost:8000/api/");
    }

    #[test]
    fn test_status_text_falls_back_to_class() {
        assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "Server Error");
        assert_eq!(status_text(StatusCode::from_u16(499).unwrap()), "Client Error");
        assert_eq!(status_text(StatusCode::from_u16(999).unwrap()), "Unknown Status");
    }
}
