mod traits;
mod gemini;
pub mod transport;
pub mod upload;
pub mod wire;

pub use traits::*;
pub use gemini::GeminiClient;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use upload::{UploadSequencer, UploadedFileReference};
