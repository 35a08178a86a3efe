//! JSON shapes for the `generateContent` and file-upload endpoints.

use super::traits::{Message, MessageContent, Role};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    FileData { file_data: FileData },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn file(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Part::FileData {
            file_data: FileData {
                mime_type: mime_type.into(),
                file_uri: file_uri.into(),
            },
        }
    }
}

/// Transcript entries go out as one text part each. Image entries carry no
/// text, so they are sent as an empty string.
impl From<&Message> for Content {
    fn from(message: &Message) -> Self {
        let text = match message.content() {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Image(_) => String::new(),
        };
        Content {
            role: Some(message.role()),
            parts: vec![Part::text(text)],
        }
    }
}

impl TryFrom<Content> for Message {
    type Error = ClientError;

    fn try_from(content: Content) -> Result<Self, Self::Error> {
        let role = content
            .role
            .ok_or_else(|| ClientError::malformed("content has no role"))?;
        let text = content
            .parts
            .into_iter()
            .find_map(|part| match part {
                Part::Text { text } => Some(text),
                Part::FileData { .. } => None,
            })
            .ok_or_else(|| ClientError::malformed("content has no text part"))?;
        Ok(Message::new(role, MessageContent::Text(text)))
    }
}

impl GenerateContentRequest {
    pub fn from_history(history: &[Message]) -> Self {
        Self {
            contents: history.iter().map(Content::from).collect(),
        }
    }

    /// Single role-less turn: the uploaded file first, then the prompt.
    pub fn for_image(prompt: &str, mime_type: &str, file_uri: &str) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::file(mime_type, file_uri), Part::text(prompt)],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Parse a response body and pull out `candidates[0].content.parts[0].text`.
    pub fn first_text(body: &[u8]) -> Result<String, ClientError> {
        let response: GenerateContentResponse = serde_json::from_slice(body)
            .map_err(|e| ClientError::malformed(format!("failed to parse response: {e}")))?;
        response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::malformed("no candidates in response"))?
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::malformed("first candidate has no parts"))?
            .text
            .ok_or_else(|| ClientError::malformed("first part has no text"))
    }
}

#[derive(Debug, Serialize)]
pub struct UploadMetadata {
    pub file: UploadMetadataFile,
}

#[derive(Debug, Serialize)]
pub struct UploadMetadataFile {
    pub display_name: String,
}

impl UploadMetadata {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            file: UploadMetadataFile {
                display_name: display_name.into(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub file: UploadedFile,
}

#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    pub uri: String,
}

impl UploadResponse {
    pub fn file_uri(body: &[u8]) -> Result<String, ClientError> {
        let response: UploadResponse = serde_json::from_slice(body)
            .map_err(|e| ClientError::malformed(format!("failed to parse upload response: {e}")))?;
        Ok(response.file.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_extracts_first_part() {
        let body = br#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}},{"content":{"parts":[{"text":"c"}]}}]}"#;
        assert_eq!(GenerateContentResponse::first_text(body).unwrap(), "a");
    }

    #[test]
    fn test_first_text_empty_candidates_is_malformed() {
        let body = br#"{"candidates":[]}"#;
        assert!(matches!(
            GenerateContentResponse::first_text(body),
            Err(ClientError::Malformed(_))
        ));
    }

    #[test]
    fn test_first_text_part_without_text_is_malformed() {
        let body = br#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#;
        assert!(matches!(
            GenerateContentResponse::first_text(body),
            Err(ClientError::Malformed(_))
        ));
    }

    #[test]
    fn test_image_request_has_no_role_and_file_first() {
        let request = GenerateContentRequest::for_image("what is this?", "image/jpeg", "files/abc");
        let json = serde_json::to_value(&request).unwrap();
        let content = &json["contents"][0];
        assert!(content.get("role").is_none());
        assert_eq!(content["parts"][0]["file_data"]["mime_type"], "image/jpeg");
        assert_eq!(content["parts"][0]["file_data"]["file_uri"], "files/abc");
        assert_eq!(content["parts"][1]["text"], "what is this?");
    }

    #[test]
    fn test_upload_response_missing_uri_is_malformed() {
        assert!(matches!(
            UploadResponse::file_uri(br#"{"file":{"name":"files/abc"}}"#),
            Err(ClientError::Malformed(_))
        ));
    }
}
