/// Gordon — centralized constants.
/// Model names, endpoints, and protocol header values live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";
    pub const DEFAULT_IMAGE_MODEL: &str = "gemini-1.5-flash";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const UPLOAD_PATH: &str = "/upload/v1beta/files";
}

// ─── Resumable Upload Protocol ────────────────────────────────────────────────

pub mod upload {
    pub const HEADER_PROTOCOL: &str = "X-Goog-Upload-Protocol";
    pub const HEADER_COMMAND: &str = "X-Goog-Upload-Command";
    pub const HEADER_CONTENT_LENGTH: &str = "X-Goog-Upload-Header-Content-Length";
    pub const HEADER_CONTENT_TYPE: &str = "X-Goog-Upload-Header-Content-Type";
    pub const HEADER_OFFSET: &str = "X-Goog-Upload-Offset";
    pub const HEADER_SESSION_URL: &str = "X-Goog-Upload-URL";

    pub const PROTOCOL_RESUMABLE: &str = "resumable";
    pub const COMMAND_START: &str = "start";
    pub const COMMAND_UPLOAD_FINALIZE: &str = "upload, finalize";

    pub const DISPLAY_NAME: &str = "UploadedImage";
    pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
    pub const CONFIG_DIR: &str = "gordon";
    pub const CONFIG_FILE: &str = "config.toml";
    /// JPEG quality used when re-encoding picked images.
    pub const JPEG_QUALITY: u8 = 80;
    pub const ERROR_PREFIX: &str = "Error: ";
}
