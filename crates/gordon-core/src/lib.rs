pub mod error;
pub mod constants;
pub mod config;
pub mod llm;
pub mod context;
pub mod session;

// Re-export key types
pub use error::{ClientError, ConfigError, SessionError};
pub use llm::{
    GeminiClient, GenerativeClient, HttpTransport, Message, MessageContent, ReqwestTransport,
    Role, UploadSequencer, UploadedFileReference,
};
pub use context::Conversation;
pub use session::{
    Completion, PendingInput, SendOutcome, SessionController, SessionState, StateChange,
    SubscriptionId,
};
pub use config::Settings;
