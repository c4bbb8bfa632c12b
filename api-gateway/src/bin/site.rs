//! Site Lambda - Serves the marketing site documents.
//!
//! Endpoints:
//! - GET / and /index.html - Landing page
//! - GET /styles.css - Stylesheet
//! - GET /script.js - Form script
//! - GET /assets/* - Served from the asset bucket, not here (404)
//! - GET /* - Falls back to the landing page for client-side routing

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{cors_response, error_response, preflight_response, route_path};
use shared::Config;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");
const STYLESHEET: &str = include_str!("../../static/styles.css");
const SCRIPT: &str = include_str!("../../static/script.js");

const ASSETS_PLACEHOLDER: &str = "{{ASSETS_BASE}}";
const ASSET_PREFIX: &str = "/assets/";

/// A resolved document for a request path.
#[derive(Debug, PartialEq)]
enum Document<'a> {
    Page(&'a str),
    Stylesheet,
    Script,
    /// Asset paths belong to the asset bucket
    Asset,
}

impl Document<'_> {
    fn content_type(&self) -> &'static str {
        match self {
            Document::Page(_) => "text/html",
            Document::Stylesheet => "text/css",
            Document::Script => "application/javascript",
            Document::Asset => "application/json",
        }
    }
}

/// Application state
struct AppState {
    index_html: String,
}

impl AppState {
    fn new(config: &Config) -> Self {
        Self {
            index_html: render_index(&config.assets_base_url()),
        }
    }

    fn resolve(&self, path: &str) -> Document<'_> {
        match path {
            "/styles.css" => Document::Stylesheet,
            "/script.js" => Document::Script,
            _ if path.starts_with(ASSET_PREFIX) => Document::Asset,
            _ => Document::Page(&self.index_html),
        }
    }
}

fn render_index(assets_base: &str) -> String {
    INDEX_TEMPLATE.replace(ASSETS_PLACEHOLDER, assets_base)
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = route_path(&event);

    debug!("Site request: {} {}", method, path);

    if method == "OPTIONS" {
        return preflight_response();
    }

    let document = state.resolve(path);
    let content_type = document.content_type();

    match document {
        Document::Page(html) => cors_response(200, Some(content_type), Body::from(html.to_string())),
        Document::Stylesheet => cors_response(200, Some(content_type), Body::from(STYLESHEET)),
        Document::Script => cors_response(200, Some(content_type), Body::from(SCRIPT)),
        Document::Asset => {
            info!(path = %path, "Asset requested from site function");
            error_response(404, "Asset not found")
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState::new(&config));
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
