use axum::{body::Bytes, extract::Multipart};
use shared::{
    error::SummarizeError,
    protocol::{has_text_extension, FILE_FIELD, SUMMARIZE_PATH},
};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

pub fn summarize_route() -> &'static str {
    SUMMARIZE_PATH
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

/// Reads the first `file` part; other parts are skipped.
pub async fn read_file_part(multipart: &mut Multipart) -> Result<UploadedFile, SummarizeError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SummarizeError::MalformedUpload(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| SummarizeError::MalformedUpload(e.body_text()))?;
        return Ok(UploadedFile { filename, bytes });
    }

    Err(SummarizeError::MissingFilePart)
}

/// Checks run in this order: empty upload, file name, blank content. Returns
/// the decoded text on success.
pub fn validate_upload(upload: &UploadedFile) -> Result<String, SummarizeError> {
    if upload.bytes.is_empty() {
        return Err(SummarizeError::EmptyUpload);
    }

    match upload.filename.as_deref() {
        Some(name) if has_text_extension(name) => {}
        _ => return Err(SummarizeError::InvalidFileType),
    }

    let text = String::from_utf8_lossy(&upload.bytes).into_owned();
    if text.trim().is_empty() {
        return Err(SummarizeError::BlankContent);
    }

    Ok(text)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
