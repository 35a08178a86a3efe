use super::transport::{HttpRequest, HttpTransport};
use super::wire::{UploadMetadata, UploadResponse};
use crate::constants::{endpoints, upload};
use crate::error::ClientError;
use std::sync::Arc;

/// Server-side handle for an uploaded image. Used once, by the generation
/// call that follows the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFileReference {
    pub uri: String,
    pub mime_type: String,
}

/// Runs the resumable-upload handshake: start a session, push the bytes in one
/// finalizing request, hand back the file URI. Any failing step ends the
/// sequence.
pub struct UploadSequencer {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: String,
}

impl UploadSequencer {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn start_url(&self) -> String {
        format!(
            "{}{}?key={}",
            self.base_url.trim_end_matches('/'),
            endpoints::UPLOAD_PATH,
            urlencoding::encode(&self.api_key)
        )
    }

    pub async fn upload(&self, image: &[u8]) -> Result<UploadedFileReference, ClientError> {
        let session_url = self.start(image.len()).await?;
        let uri = self.transfer(&session_url, image).await?;
        Ok(UploadedFileReference {
            uri,
            mime_type: upload::IMAGE_MIME_TYPE.to_string(),
        })
    }

    /// Step 1: open an upload session and return its URL.
    pub async fn start(&self, content_length: usize) -> Result<String, ClientError> {
        let request = HttpRequest::post(self.start_url())
            .header(upload::HEADER_PROTOCOL, upload::PROTOCOL_RESUMABLE)
            .header(upload::HEADER_COMMAND, upload::COMMAND_START)
            .header(upload::HEADER_CONTENT_LENGTH, content_length.to_string())
            .header(upload::HEADER_CONTENT_TYPE, upload::IMAGE_MIME_TYPE)
            .json(&UploadMetadata::new(upload::DISPLAY_NAME))?;

        tracing::debug!("Starting resumable upload ({} bytes)", content_length);
        let response = self.transport.post(request).await?.error_for_status()?;

        let session_url = response
            .header(upload::HEADER_SESSION_URL)
            .filter(|url| !url.is_empty())
            .ok_or(ClientError::UploadSessionMissing)?;
        tracing::info!("Upload session opened");
        Ok(session_url.to_string())
    }

    /// Step 2: send every byte at offset 0 and finalize in the same request.
    pub async fn transfer(&self, session_url: &str, image: &[u8]) -> Result<String, ClientError> {
        let request = HttpRequest::post(session_url)
            .header("Content-Length", image.len().to_string())
            .header(upload::HEADER_OFFSET, "0")
            .header(upload::HEADER_COMMAND, upload::COMMAND_UPLOAD_FINALIZE)
            .bytes(image.to_vec());

        let response = self.transport.post(request).await?.error_for_status()?;
        let uri = UploadResponse::file_uri(&response.body)?;
        tracing::debug!("Upload finalized: {}", uri);
        Ok(uri)
    }
}
