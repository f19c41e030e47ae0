use std::fmt;

/// A file chosen by the user, held by the component until the next selection
/// or the end of an upload attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.content.len()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size_bytes", &self.content.len())
            .finish()
    }
}

/// Files carried by one change notification of the input surface.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    pub files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(file: SelectedFile) -> Self {
        Self { files: vec![file] }
    }
}

impl From<Vec<SelectedFile>> for FileSelection {
    fn from(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }
}

/// Everything the component shows. Empty strings mean "nothing to show".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentState {
    pub selected_file: Option<SelectedFile>,
    pub summary: String,
    pub error_message: String,
    pub is_loading: bool,
}

impl ComponentState {
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    fn clear_results(&mut self) {
        self.summary.clear();
        self.error_message.clear();
    }

    pub(crate) fn begin_selection(&mut self) {
        self.clear_results();
    }

    pub(crate) fn begin_upload(&mut self) {
        self.is_loading = true;
        self.clear_results();
    }

    pub(crate) fn finish_upload(&mut self) {
        self.is_loading = false;
        self.selected_file = None;
    }
}
