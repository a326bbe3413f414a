//! Embedded single-room page
//!
//! The page fetches an access token once, then hands it to the hosted LiveKit
//! client SDK together with the server URL. Everything the page needs to know
//! from the server side travels in a [`PageModel`] rendered into the HTML as
//! JSON, so the script itself stays static.

pub mod mic;
pub mod status;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use mic::{MicLook, MicState};
pub use status::{ConnectionState, FALLBACK_INDICATOR_CLASS};

const INDEX_TEMPLATE: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");
const STYLES_CSS: &str = include_str!("../static/styles.css");

const MODEL_PLACEHOLDER: &str = "{{PAGE_MODEL}}";

pub const APP_JS_PATH: &str = "/assets/app.js";
pub const STYLES_PATH: &str = "/assets/styles.css";

/// Server-side state of the page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    /// LiveKit WebSocket URL, empty when unset
    pub server_url: String,

    /// Path the page fetches its token from
    pub token_endpoint: String,

    /// Status dot class per connection state
    pub status_classes: BTreeMap<&'static str, &'static str>,

    pub fallback_status_class: &'static str,

    pub mic: MicLooks,

    pub copy: PageCopy,
}

#[derive(Debug, Clone, Serialize)]
pub struct MicLooks {
    pub live: MicLook,
    pub muted: MicLook,
}

/// User-facing strings
#[derive(Debug, Clone, Serialize)]
pub struct PageCopy {
    pub loading: &'static str,
    pub waiting: &'static str,
}

impl PageModel {
    pub fn new(server_url: impl Into<String>, token_endpoint: impl Into<String>) -> Self {
        let status_classes = ConnectionState::ALL
            .iter()
            .map(|state| (state.as_str(), state.indicator_class()))
            .collect();

        Self {
            server_url: server_url.into(),
            token_endpoint: token_endpoint.into(),
            status_classes,
            fallback_status_class: FALLBACK_INDICATOR_CLASS,
            mic: MicLooks {
                live: MicState::Live.look(),
                muted: MicState::Muted.look(),
            },
            copy: PageCopy {
                loading: "Initializing Neural Link...",
                waiting: "WAITING FOR NEURAL FEED...",
            },
        }
    }
}

/// Render the page with `model` embedded
pub fn render_page(model: &PageModel) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(model)?;
    // Keep the JSON from closing its <script> element
    let json = json.replace("</", "<\\/");
    Ok(INDEX_TEMPLATE.replace(MODEL_PLACEHOLDER, &json))
}

/// Routes serving the page and its assets
///
/// The page is rendered once here. A model that fails to serialise falls
/// back to a page without one, which the script reports in the console.
pub fn router(model: PageModel) -> Router {
    let html = render_page(&model).unwrap_or_else(|e| {
        tracing::error!("Failed to render page model: {}", e);
        INDEX_TEMPLATE.replace(MODEL_PLACEHOLDER, "null")
    });

    if model.server_url.is_empty() {
        tracing::warn!("Room page has no LiveKit server URL");
    }

    Router::new()
        .route("/", get(index))
        .route(APP_JS_PATH, get(app_js))
        .route(STYLES_PATH, get(styles_css))
        .with_state(Arc::new(html))
}

async fn index(State(html): State<Arc<String>>) -> Html<String> {
    Html(html.as_str().to_owned())
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn styles_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}
