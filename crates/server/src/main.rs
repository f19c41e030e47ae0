use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use shared::error::SummarizeError;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info, warn};

mod api;
mod app_state;
mod config;
mod summarizer;

use api::{healthz_route, read_file_part, summarize_route, validate_upload};
use app_state::AppState;
use config::load_settings;
use summarizer::SummarizerError;

/// Plain-text error response; the body is the `SummarizeError` message.
#[derive(Debug)]
struct ApiFailure(SummarizeError);

impl From<SummarizeError> for ApiFailure {
    fn from(value: SummarizeError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, self.0.to_string()).into_response()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings()?;
    let summarizer = summarizer::from_settings(&settings)?;
    let state = AppState { summarizer };
    let app = build_router(Arc::new(state), settings.max_upload_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, model = %settings.openai_model, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(healthz_route(), get(healthz))
        .route(summarize_route(), post(summarize))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, ApiFailure> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "rejected non-multipart upload");
        SummarizeError::MalformedUpload(rejection.body_text())
    })?;

    let upload = read_file_part(&mut multipart).await.map_err(|error| {
        warn!(%error, "rejected upload");
        error
    })?;
    let text = validate_upload(&upload).map_err(|error| {
        warn!(filename = ?upload.filename, %error, "rejected upload");
        error
    })?;

    info!(filename = ?upload.filename, size_bytes = upload.bytes.len(), "summarizing upload");
    match state.summarizer.summarize(&text).await {
        Ok(summary) => Ok(summary),
        Err(SummarizerError::NotConfigured) => {
            error!("summarize request refused; OpenAI API key not configured");
            Err(SummarizeError::ApiKeyNotConfigured.into())
        }
        Err(err) => {
            error!(error = %err, "summarization failed");
            Err(SummarizeError::Processing(err.to_string()).into())
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
