//! User-facing error messages and the failure classification table.

use shared::protocol::{
    API_KEY_NOT_CONFIGURED_MARKER, EMPTY_CONTENT_MARKER, INVALID_FILE_TYPE_MARKER,
};
use thiserror::Error;

use crate::transport::{FailureBody, UploadFailure};

/// Problems with the user's input. Caught before anything touches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please select a file first.")]
    NoFileSelected,
    #[error("Invalid file type. Please select a .txt file.")]
    InvalidFileType,
}

/// The closed set of messages a failed upload can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("Error: Could not connect to the backend. Please ensure it is running and accessible.")]
    CouldNotConnect,
    #[error("Error: The OpenAI API key is not configured on the server. Please contact the administrator.")]
    ApiKeyNotConfigured,
    #[error("Error: The uploaded file content is empty or contains only whitespace.")]
    EmptyFileContent,
    #[error("Error: Invalid file type. Only .txt files are allowed.")]
    InvalidFileType,
    #[error("Error from server: {0}")]
    Server(String),
    #[error("An unexpected error occurred: {status_text} (Status: {status})")]
    Unexpected { status_text: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    ServerDomain,
    ServerOpaque,
}

impl ClassifiedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CouldNotConnect => ErrorKind::Transport,
            Self::ApiKeyNotConfigured
            | Self::EmptyFileContent
            | Self::InvalidFileType
            | Self::Server(_) => ErrorKind::ServerDomain,
            Self::Unexpected { .. } => ErrorKind::ServerOpaque,
        }
    }
}

/// Maps a failed upload to a message. Rules are checked in order and the first
/// match wins; server bodies are matched on exact substrings.
pub fn classify(failure: &UploadFailure) -> ClassifiedError {
    if failure.status == 0 {
        return ClassifiedError::CouldNotConnect;
    }

    match &failure.body {
        FailureBody::Text(body) if !body.is_empty() => {
            if body.contains(API_KEY_NOT_CONFIGURED_MARKER) {
                ClassifiedError::ApiKeyNotConfigured
            } else if body.contains(EMPTY_CONTENT_MARKER) {
                ClassifiedError::EmptyFileContent
            } else if body.contains(INVALID_FILE_TYPE_MARKER) {
                ClassifiedError::InvalidFileType
            } else {
                ClassifiedError::Server(body.clone())
            }
        }
        _ => ClassifiedError::Unexpected {
            status_text: failure.status_text.clone(),
            status: failure.status,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_failure(status: u16, status_text: &str, body: &str) -> UploadFailure {
        UploadFailure::new(status, status_text, FailureBody::Text(body.to_string()))
    }

    #[test]
    fn status_zero_wins_over_any_body() {
        let failure = text_failure(0, "Unknown Error", "OpenAI API key not configured");
        assert_eq!(classify(&failure), ClassifiedError::CouldNotConnect);

        let failure = UploadFailure::new(
            0,
            "Unknown Error",
            FailureBody::Structured(serde_json::json!({ "error": "x" })),
        );
        assert_eq!(classify(&failure), ClassifiedError::CouldNotConnect);
        assert_eq!(
            classify(&failure).to_string(),
            "Error: Could not connect to the backend. Please ensure it is running and accessible."
        );
    }

    #[test]
    fn api_key_marker_maps_to_admin_message() {
        let failure = text_failure(400, "Bad Request", "OpenAI API key not configured on the server.");
        assert_eq!(
            classify(&failure).to_string(),
            "Error: The OpenAI API key is not configured on the server. Please contact the administrator."
        );
    }

    #[test]
    fn empty_content_marker_maps_to_whitespace_message() {
        let failure = text_failure(400, "Bad Request", "File content is empty or whitespace only.");
        assert_eq!(classify(&failure), ClassifiedError::EmptyFileContent);
    }

    #[test]
    fn invalid_type_marker_maps_to_txt_only_message() {
        let failure = text_failure(400, "Bad Request", "Invalid file type. Only .txt files are allowed.");
        assert_eq!(
            classify(&failure).to_string(),
            "Error: Invalid file type. Only .txt files are allowed."
        );
    }

    #[test]
    fn earlier_marker_wins_when_several_match() {
        let failure = text_failure(
            400,
            "Bad Request",
            "Invalid file type, and also OpenAI API key not configured",
        );
        assert_eq!(classify(&failure), ClassifiedError::ApiKeyNotConfigured);

        let failure = text_failure(400, "Bad Request", "Invalid file type / File content is empty");
        assert_eq!(classify(&failure), ClassifiedError::EmptyFileContent);
    }

    #[test]
    fn markers_are_case_sensitive() {
        let failure = text_failure(400, "Bad Request", "invalid file type");
        assert_eq!(
            classify(&failure),
            ClassifiedError::Server("invalid file type".to_string())
        );
    }

    #[test]
    fn unrecognized_text_is_interpolated_verbatim() {
        let failure = text_failure(500, "Internal Server Error", "Server-side error message");
        assert_eq!(
            classify(&failure).to_string(),
            "Error from server: Server-side error message"
        );

        let failure = text_failure(502, "Bad Gateway", "  padded\n");
        assert_eq!(classify(&failure).to_string(), "Error from server:   padded\n");
    }

    #[test]
    fn non_text_bodies_use_status_template() {
        let structured = UploadFailure::new(
            500,
            "Internal Server Error",
            FailureBody::Structured(serde_json::json!({ "message": "Invalid file type" })),
        );
        assert_eq!(
            classify(&structured).to_string(),
            "An unexpected error occurred: Internal Server Error (Status: 500)"
        );

        let binary = UploadFailure::new(415, "Unsupported Media Type", FailureBody::Binary(vec![0xff, 0x00]));
        assert_eq!(
            classify(&binary).to_string(),
            "An unexpected error occurred: Unsupported Media Type (Status: 415)"
        );

        let absent = UploadFailure::new(404, "Not Found", FailureBody::Absent);
        assert_eq!(classify(&absent).kind(), ErrorKind::ServerOpaque);
    }

    #[test]
    fn empty_text_body_counts_as_absent() {
        let failure = text_failure(503, "Service Unavailable", "");
        assert_eq!(
            classify(&failure),
            ClassifiedError::Unexpected {
                status_text: "Service Unavailable".to_string(),
                status: 503,
            }
        );
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ClassifiedError::CouldNotConnect.kind(), ErrorKind::Transport);
        assert_eq!(ClassifiedError::Server("x".into()).kind(), ErrorKind::ServerDomain);
        assert_eq!(ClassifiedError::InvalidFileType.kind(), ErrorKind::ServerDomain);
    }

    #[test]
    fn input_error_messages_are_fixed() {
        assert_eq!(InputError::NoFileSelected.to_string(), "Please select a file first.");
        assert_eq!(
            InputError::InvalidFileType.to_string(),
            "Invalid file type. Please select a .txt file."
        );
    }
}
