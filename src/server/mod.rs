//! HTTP surface: the countdown endpoint, a health probe and the streaming plumbing between the
//! blocking renderer and the async response body.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use chrono::{DateTime, SecondsFormat, Utc};
use tower_http::trace::TraceLayer;

use crate::fonts::registry::FontRegistry;
use crate::style::policy::RenderPolicy;
use crate::time::remaining::{Clock, SystemClock};

pub(crate) mod handlers;
pub(crate) mod stream;

/// Path of the countdown endpoint.
pub const COUNTDOWN_PATH: &str = "/api/countdown.gif";

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Faces used by every composer.
    pub fonts: FontRegistry,
    /// Deployment profile policy.
    pub policy: RenderPolicy,
    /// Source of "now".
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State using the system clock.
    pub fn new(fonts: FontRegistry, policy: RenderPolicy) -> Self {
        Self {
            fonts,
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("fonts", &self.fonts)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(COUNTDOWN_PATH, get(handlers::countdown_gif))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Named color themes used in startup example links.
const EXAMPLE_THEMES: [(&str, &str); 3] = [
    ("default", ""),
    (
        "warm",
        "&bg1=4a0e0e&bg2=8e2f17&boxcolor=c2482a&textcolor=ffffff&labelcolor=fdd3c9",
    ),
    (
        "green",
        "&bg1=032b13&bg2=0f522e&boxcolor=1a7d49&textcolor=ffffff&labelcolor=b6e6ce",
    ),
];

/// Example request URLs for each theme, counting down to `target` over ten frames.
pub fn example_urls(base_url: &str, target: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let time = target.to_rfc3339_opts(SecondsFormat::Millis, true);
    let base = base_url.trim_end_matches('/');
    EXAMPLE_THEMES
        .iter()
        .map(|(name, colors)| {
            (
                *name,
                format!("{base}{COUNTDOWN_PATH}?time={time}&duration=10{colors}"),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/server/mod.rs"]
mod tests;
