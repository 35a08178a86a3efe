use super::traits::*;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use super::upload::UploadSequencer;
use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::config::Settings;
use crate::constants::{endpoints, models};
use crate::error::{ClientError, ConfigError};
use std::sync::Arc;

/// Client for the Gemini `generateContent` API. Holds no conversation state;
/// every call is a single attempt.
pub struct GeminiClient {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    base_url: String,
    upload_base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            api_key: api_key.into(),
            base_url: endpoints::GEMINI_BASE_URL.to_string(),
            upload_base_url: endpoints::GEMINI_BASE_URL.to_string(),
            text_model: models::DEFAULT_TEXT_MODEL.to_string(),
            image_model: models::DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.api_key()?)
            .with_base_url(&settings.base_url)
            .with_upload_base_url(settings.upload_base_url())
            .with_text_model(&settings.text_model)
            .with_image_model(&settings.image_model))
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Also moves uploads to `url`; call `with_upload_base_url` afterwards to
    /// send them elsewhere.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self.upload_base_url = self.base_url.clone();
        self
    }

    pub fn with_upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = url.into();
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            model,
            urlencoding::encode(&self.api_key)
        )
    }

    fn uploader(&self) -> UploadSequencer {
        UploadSequencer::new(
            self.transport.clone(),
            &self.upload_base_url,
            self.api_key.clone(),
        )
    }

    async fn generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, ClientError> {
        let request = HttpRequest::post(self.generate_url(model)).json(body)?;
        tracing::debug!(
            "generateContent on {} with {} content item(s)",
            model,
            body.contents.len()
        );

        let response = self.transport.post(request).await?.error_for_status()?;
        GenerateContentResponse::first_text(&response.body)
    }
}

#[async_trait::async_trait]
impl GenerativeClient for GeminiClient {
    async fn send_text(&self, history: &[Message]) -> Result<String, ClientError> {
        let body = GenerateContentRequest::from_history(history);
        self.generate(&self.text_model, &body).await
    }

    async fn send_image(&self, prompt: &str, image: &[u8]) -> Result<String, ClientError> {
        let file = self.uploader().upload(image).await?;
        let body = GenerateContentRequest::for_image(prompt, &file.mime_type, &file.uri);
        self.generate(&self.image_model, &body).await
    }
}
