use crate::error::ClientError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Tag used for the `role` field on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "user" => Some(Role::User),
            "model" => Some(Role::Model),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageContent {
    Text(String),
    Image(Vec<u8>),
}

impl MessageContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&[u8]> {
        match self {
            MessageContent::Text(_) => None,
            MessageContent::Image(bytes) => Some(bytes),
        }
    }
}

/// One transcript entry. Immutable once built: fields are only readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    id: Uuid,
    role: Role,
    content: MessageContent,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, MessageContent::Text(text.into()))
    }

    pub fn user_image(bytes: Vec<u8>) -> Self {
        Self::new(Role::User, MessageContent::Image(bytes))
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, MessageContent::Text(text.into()))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn text(&self) -> Option<&str> {
        self.content.text()
    }
}

/// The generation client seam. `GeminiClient` talks HTTP; tests and hosts may
/// provide their own.
#[async_trait::async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send the whole transcript and return the first candidate's text.
    async fn send_text(&self, history: &[Message]) -> Result<String, ClientError>;

    /// Upload `image` (JPEG bytes) and ask about it with `prompt`.
    async fn send_image(&self, prompt: &str, image: &[u8]) -> Result<String, ClientError>;
}
