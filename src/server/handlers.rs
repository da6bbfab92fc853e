use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::foundation::error::CountdownError;
use crate::server::AppState;
use crate::server::stream;
use crate::session::render_session::CountdownSession;
use crate::style::resolve::RequestParams;

/// Errors surfaced to HTTP clients. Bodies are fixed strings; detail stays in the logs.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ApiError {
    MissingTime,
    InvalidTime,
    Internal,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingTime => (StatusCode::BAD_REQUEST, "missing \"time\" parameter"),
            ApiError::InvalidTime => (StatusCode::BAD_REQUEST, "invalid \"time\" format"),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to render countdown",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status_and_message().into_response()
    }
}

impl From<CountdownError> for ApiError {
    fn from(err: CountdownError) -> Self {
        match err {
            CountdownError::MissingInput(_) => ApiError::MissingTime,
            CountdownError::InvalidInput(_) => ApiError::InvalidTime,
            other => {
                tracing::error!(error = %other, "countdown request failed");
                ApiError::Internal
            }
        }
    }
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

/// Validate, then stream the GIF as it is encoded.
///
/// Repeated keys keep their first value, and an unreadable query string counts as empty, so the
/// only 400 bodies are the two fixed `time` messages.
///
/// The response head is only sent once the first encoded chunk exists, so a failure before any
/// byte was produced is still a clean 500.
pub(crate) async fn countdown_gif(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable query string");
            Vec::new()
        }
    };
    let params = RequestParams::from_pairs(pairs);
    let session = CountdownSession::prepare(&params, &state.policy, state.clock.as_ref())?;
    tracing::debug!(
        initial_secs = session.initial_secs(),
        frames = session.style().frame_count,
        "countdown accepted"
    );

    let mut rx = stream::spawn_render(session, state.fonts.clone());
    let first = match rx.recv().await {
        Some(Ok(chunk)) => chunk,
        Some(Err(_)) | None => return Err(ApiError::Internal),
    };

    let body = Body::from_stream(stream::body_stream(first, rx));
    Ok((
        [(CONTENT_TYPE, "image/gif"), (CACHE_CONTROL, "no-store")],
        body,
    )
        .into_response())
}

#[cfg(test)]
#[path = "../../tests/unit/server/handlers.rs"]
mod tests;
