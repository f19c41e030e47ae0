//! The summarizer component: visible state plus the upload orchestration.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{
    error::{classify, ClassifiedError, InputError},
    selection::{validate, InputSurface, SelectionOutcome},
    transport::UploadTransport,
    types::{ComponentState, FileSelection},
};

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded(String),
    Failed(ClassifiedError),
    /// Nothing was sent because the input was not usable.
    Blocked(InputError),
    /// Another upload is still in flight; state was left untouched.
    Busy,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Owns the `ComponentState`. All writes go through the watch sender, so the
/// component can be shared across tasks behind an `Arc`.
pub struct SummarizerComponent<T: UploadTransport> {
    transport: T,
    input: Arc<dyn InputSurface>,
    state: watch::Sender<ComponentState>,
}

impl<T: UploadTransport> SummarizerComponent<T> {
    pub fn new(transport: T, input: Arc<dyn InputSurface>) -> Self {
        let (state, _) = watch::channel(ComponentState::default());
        Self {
            transport,
            input,
            state,
        }
    }

    pub fn state(&self) -> ComponentState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ComponentState> {
        self.state.subscribe()
    }

    /// Handles a change notification from the input surface.
    pub fn select(&self, selection: FileSelection) -> SelectionOutcome {
        let validated = validate(selection);
        let mut outcome = SelectionOutcome::Cleared;

        self.state.send_modify(|state| {
            state.begin_selection();
            match validated {
                Ok(Some(file)) => {
                    outcome = SelectionOutcome::Accepted {
                        name: file.name.clone(),
                    };
                    state.selected_file = Some(file);
                }
                Ok(None) => {
                    state.selected_file = None;
                }
                Err(input_error) => {
                    state.selected_file = None;
                    state.error_message = input_error.to_string();
                    outcome = SelectionOutcome::Rejected(input_error);
                }
            }
        });

        if let SelectionOutcome::Rejected(_) = outcome {
            debug!("rejected selection; resetting input surface");
            self.input.reset();
        }
        outcome
    }

    /// Uploads the held file and records either the summary or a classified
    /// error. The held file is dropped once the request resolves.
    pub async fn submit(&self) -> SubmitOutcome {
        let mut start = Err(SubmitOutcome::Busy);
        self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            match state.selected_file.clone() {
                Some(file) => {
                    state.begin_upload();
                    start = Ok(file);
                }
                None => {
                    state.error_message = InputError::NoFileSelected.to_string();
                    start = Err(SubmitOutcome::Blocked(InputError::NoFileSelected));
                }
            }
            true
        });

        let file = match start {
            Ok(file) => file,
            Err(outcome) => {
                if outcome == SubmitOutcome::Busy {
                    warn!("submit ignored; an upload is already in flight");
                }
                return outcome;
            }
        };

        let in_flight = InFlight::new(&self.state, self.input.as_ref());
        info!(file = %file.name, size_bytes = file.size_bytes(), "uploading file for summarization");
        let outcome = match self.transport.upload(&file).await {
            Ok(summary) => {
                info!(file = %file.name, summary_len = summary.len(), "summary received");
                SubmitOutcome::Succeeded(summary)
            }
            Err(failure) => {
                let classified = classify(&failure);
                error!(
                    file = %file.name,
                    status = failure.status,
                    status_text = %failure.status_text,
                    body = failure.body.shape(),
                    kind = ?classified.kind(),
                    "backend error"
                );
                debug!(body = ?failure.body, "backend error body");
                SubmitOutcome::Failed(classified)
            }
        };

        in_flight.complete(&outcome);
        outcome
    }
}

/// Marks the upload started by `submit` as in flight. If the `submit` future
/// is dropped before the request resolves, dropping this clears the loading
/// flag and the held file so the next `submit` is not reported as busy.
struct InFlight<'a> {
    state: &'a watch::Sender<ComponentState>,
    input: &'a dyn InputSurface,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<ComponentState>, input: &'a dyn InputSurface) -> Self {
        Self {
            state,
            input,
            armed: true,
        }
    }

    fn complete(mut self, outcome: &SubmitOutcome) {
        self.armed = false;
        self.state.send_modify(|state| {
            state.finish_upload();
            match outcome {
                SubmitOutcome::Succeeded(summary) => state.summary = summary.clone(),
                SubmitOutcome::Failed(classified) => state.error_message = classified.to_string(),
                SubmitOutcome::Blocked(_) | SubmitOutcome::Busy => {}
            }
        });
        self.input.reset();
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("upload abandoned before the request resolved");
        self.state.send_modify(ComponentState::finish_upload);
        self.input.reset();
    }
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;
