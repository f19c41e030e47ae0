//! Endpoint, multipart layout and error-body markers of the summarize API.

/// Path of the upload endpoint, relative to the backend base URL.
pub const SUMMARIZE_PATH: &str = "/api/summarize";

/// Name of the single multipart part carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// The only media type the client accepts for upload.
pub const TEXT_PLAIN: &str = "text/plain";

/// Extension the server requires on uploaded file names.
pub const TEXT_EXTENSION: &str = ".txt";

// Substrings the client looks for in plain-text error bodies. Server messages in
// `error::SummarizeError` must keep containing them.
pub const API_KEY_NOT_CONFIGURED_MARKER: &str = "OpenAI API key not configured";
pub const EMPTY_CONTENT_MARKER: &str = "File content is empty";
pub const INVALID_FILE_TYPE_MARKER: &str = "Invalid file type";

pub fn summarize_url(backend_url: &str) -> String {
    format!("{}{SUMMARIZE_PATH}", backend_url.trim_end_matches('/'))
}

pub fn has_text_extension(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(TEXT_EXTENSION)
}
