//! Outbound calls to the style automation webhook.
//!
//! All three interactions hit the same endpoint with a single attempt and
//! hand back the raw response text; decoding is the caller's concern.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::{FilterSettings, Gender},
    protocol::WebhookRequest,
};
use tracing::{debug, info};
use url::Url;

use crate::error::WebhookError;

pub const DEFAULT_WEBHOOK_URL: &str = "https://hook.eu1.make.com/uxp6o031fhb2swo3knmr3995m7b2x027";

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, WebhookError> {
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            return Err(WebhookError::UnsupportedMedia(mime_type));
        }
        Ok(Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, WebhookError> {
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        if !mime_type.starts_with("image/") {
            return Err(WebhookError::UnsupportedMedia(mime_type));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, mime_type, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSearchQuery {
    pub filters: FilterSettings,
    pub previous_analysis_text: String,
    pub analysis_id: String,
}

impl FilterSearchQuery {
    pub fn to_request(&self) -> WebhookRequest {
        WebhookRequest::FilterSearch {
            filters: self.filters.clone(),
            previous_analysis_text: self.previous_analysis_text.clone(),
            analysis_id: self.analysis_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub first_name: String,
    pub email: String,
    pub gender: Gender,
    pub analysis_text: String,
    pub filters: FilterSettings,
    pub analysis_id: String,
}

impl LeadSubmission {
    pub fn to_request(&self) -> WebhookRequest {
        WebhookRequest::StyleGuidePdf {
            first_name: self.first_name.clone(),
            gender: self.gender,
            email: self.email.clone(),
            analysis_text: self.analysis_text.clone(),
            filters: self.filters.clone(),
            analysis_id: self.analysis_id.clone(),
        }
    }
}

#[async_trait]
pub trait StyleWebhook: Send + Sync {
    async fn submit_analysis(&self, image: &ImageUpload) -> Result<String, WebhookError>;

    async fn post_json(&self, request: &WebhookRequest) -> Result<String, WebhookError>;

    async fn submit_filter_search(
        &self,
        query: &FilterSearchQuery,
    ) -> Result<String, WebhookError> {
        self.post_json(&query.to_request()).await
    }

    async fn submit_lead_capture(
        &self,
        submission: &LeadSubmission,
    ) -> Result<String, WebhookError> {
        self.post_json(&submission.to_request()).await
    }
}

pub struct HttpStyleWebhook {
    http: Client,
    endpoint: Url,
}

impl HttpStyleWebhook {
    pub fn new(endpoint: &str) -> Result<Self, WebhookError> {
        Ok(Self {
            http: Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn read_text(response: Response) -> Result<String, WebhookError> {
        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Http {
                status: status.as_u16(),
            });
        }
        let text = response.text().await?;
        debug!(bytes = text.len(), "webhook responded");
        Ok(text)
    }
}

#[async_trait]
impl StyleWebhook for HttpStyleWebhook {
    async fn submit_analysis(&self, image: &ImageUpload) -> Result<String, WebhookError> {
        info!(
            file = image.file_name(),
            mime = image.mime_type(),
            bytes = image.len(),
            "submitting image for style analysis"
        );
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        Self::read_text(response).await
    }

    async fn post_json(&self, request: &WebhookRequest) -> Result<String, WebhookError> {
        info!(
            mode = request.mode(),
            analysis_id = request.analysis_id(),
            "posting webhook request"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        Self::read_text(response).await
    }
}

#[cfg(test)]
#[path = "tests/webhook_tests.rs"]
mod tests;
