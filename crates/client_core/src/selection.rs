//! Selection validation for the file input.

use shared::protocol::TEXT_PLAIN;

use crate::{
    error::InputError,
    types::{FileSelection, SelectedFile},
};

/// The UI element files are picked from. Reset clears its displayed value so
/// picking the same file again still fires a change notification.
pub trait InputSurface: Send + Sync {
    fn reset(&self);
}

/// Input surface for callers with nothing to reset.
pub struct DetachedInput;

impl InputSurface for DetachedInput {
    fn reset(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Cleared,
    Accepted { name: String },
    Rejected(InputError),
}

/// `Ok(None)` for an empty selection, `Ok(Some(file))` for an accepted one.
/// Only the first file is looked at.
pub fn validate(selection: FileSelection) -> Result<Option<SelectedFile>, InputError> {
    let Some(file) = selection.files.into_iter().next() else {
        return Ok(None);
    };

    if file.media_type == TEXT_PLAIN {
        Ok(Some(file))
    } else {
        Err(InputError::InvalidFileType)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: &str) -> SelectedFile {
        SelectedFile::new(name, media_type, b"dummy content".to_vec())
    }

    #[test]
    fn empty_selection_is_cleared() {
        assert_eq!(validate(FileSelection::empty()), Ok(None));
    }

    #[test]
    fn plain_text_is_accepted() {
        let accepted = validate(FileSelection::single(file("test.txt", "text/plain")))
            .expect("accepted");
        assert_eq!(accepted, Some(file("test.txt", "text/plain")));
    }

    #[test]
    fn other_media_types_are_rejected() {
        for media_type in ["image/png", "application/pdf", "text/markdown", "", "TEXT/PLAIN"] {
            assert_eq!(
                validate(FileSelection::single(file("x", media_type))),
                Err(InputError::InvalidFileType),
                "{media_type}"
            );
        }
    }

    #[test]
    fn media_type_decides_not_extension() {
        assert!(validate(FileSelection::single(file("notes.md", "text/plain"))).is_ok());
        assert!(validate(FileSelection::single(file("notes.txt", "image/png"))).is_err());
    }

    #[test]
    fn only_first_file_counts() {
        let selection = FileSelection::from(vec![
            file("image.png", "image/png"),
            file("test.txt", "text/plain"),
        ]);
        assert_eq!(validate(selection), Err(InputError::InvalidFileType));

        let selection = FileSelection::from(vec![
            file("test.txt", "text/plain"),
            file("image.png", "image/png"),
        ]);
        assert_eq!(
            validate(selection).expect("accepted").map(|f| f.name),
            Some("test.txt".to_string())
        );
    }
}
