use std::sync::Arc;

use crate::summarizer::Summarizer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) summarizer: Arc<dyn Summarizer>,
}
