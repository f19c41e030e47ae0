use thiserror::Error;

/// Failures of `POST /api/summarize`. The `Display` output is the exact
/// plain-text body the server sends back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    #[error("Required request part 'file' is not present")]
    MissingFilePart,
    #[error("File is empty. Please select a .txt file to upload.")]
    EmptyUpload,
    #[error("Invalid file type. Only .txt files are allowed.")]
    InvalidFileType,
    #[error("File content is empty or whitespace only.")]
    BlankContent,
    #[error("Malformed multipart request: {0}")]
    MalformedUpload(String),
    #[error("OpenAI API key not configured on the server.")]
    ApiKeyNotConfigured,
    #[error("Error processing file: {0}")]
    Processing(String),
}

impl SummarizeError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFilePart
            | Self::EmptyUpload
            | Self::InvalidFileType
            | Self::BlankContent
            | Self::MalformedUpload(_) => 400,
            Self::ApiKeyNotConfigured => 503,
            Self::Processing(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        API_KEY_NOT_CONFIGURED_MARKER, EMPTY_CONTENT_MARKER, INVALID_FILE_TYPE_MARKER,
    };

    #[test]
    fn server_bodies_keep_client_markers() {
        assert!(SummarizeError::ApiKeyNotConfigured
            .to_string()
            .contains(API_KEY_NOT_CONFIGURED_MARKER));
        assert!(SummarizeError::BlankContent
            .to_string()
            .contains(EMPTY_CONTENT_MARKER));
        assert!(SummarizeError::InvalidFileType
            .to_string()
            .contains(INVALID_FILE_TYPE_MARKER));
    }

    #[test]
    fn empty_upload_body_does_not_look_like_blank_content() {
        assert!(!SummarizeError::EmptyUpload
            .to_string()
            .contains(EMPTY_CONTENT_MARKER));
    }

    #[test]
    fn status_codes_split_client_and_server_faults() {
        assert_eq!(SummarizeError::InvalidFileType.status_code(), 400);
        assert_eq!(SummarizeError::ApiKeyNotConfigured.status_code(), 503);
        assert_eq!(
            SummarizeError::Processing("boom".into()).status_code(),
            500
        );
    }
}
