//! Client side of the text summarizer: pick a `.txt` file, upload it to the
//! summarize API, and surface the summary or a user-facing error.

pub mod component;
pub mod config;
pub mod error;
pub mod selection;
pub mod transport;
pub mod types;

pub use component::{SubmitOutcome, SummarizerComponent};
pub use error::{classify, ClassifiedError, ErrorKind, InputError};
pub use selection::{validate, DetachedInput, InputSurface, SelectionOutcome};
pub use transport::{FailureBody, HttpTransport, UploadFailure, UploadTransport};
pub use types::{ComponentState, FileSelection, SelectedFile};

/// Builds a component that talks to the backend described by `settings`.
pub fn http_component(
    settings: &config::ClientSettings,
    input: std::sync::Arc<dyn InputSurface>,
) -> anyhow::Result<SummarizerComponent<HttpTransport>> {
    let transport = HttpTransport::new(&settings.backend_url, settings.request_timeout())?;
    Ok(SummarizerComponent::new(transport, input))
}
