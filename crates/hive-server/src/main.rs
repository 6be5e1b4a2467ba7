mod pages;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use hive::{Config, Engine, HiveError, RequestEnvironment, Scheme};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    engine: Arc<Engine>,
    uri_param: String,
    fallback_host: String,
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    info!(
        "{} v{} - assets: {:?}",
        config.project.name, config.project.version, config.assets.root_dir
    );

    let registry = pages::registry()?;
    let engine = match Engine::from_config(registry.clone(), config.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            // Pages answer with a visible missing-asset error until this is fixed
            warn!("Asset discovery failed: {:#}", e);
            Engine::new(registry, config.clone())
        }
    };

    let unresolved = engine.validate();
    if !unresolved.is_empty() {
        warn!("Unresolved route handlers: {:?}", unresolved);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        engine: Arc::new(engine),
        uri_param: config.routing.uri_param.clone(),
        fallback_host: addr.clone(),
        port: config.server.port,
    };

    let app = Router::new()
        .route("/", get(page_handler))
        .route("/*path", get(page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn page_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let env = request_environment(&state, &uri, &headers, &query);

    match state.engine.render(pages::ENTRY, &env) {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Builds the engine's view of the request
///
/// The `uri` query parameter (name configurable) overrides the request
/// path, so `/?uri=post/show/1` and `/post/show/1` render the same page.
fn request_environment(
    state: &AppState,
    uri: &Uri,
    headers: &HeaderMap,
    query: &HashMap<String, String>,
) -> RequestEnvironment {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or(&state.fallback_host)
        .to_string();

    let https = headers
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .map(|proto| if proto.eq_ignore_ascii_case("https") { "on" } else { "off" });
    let scheme = Scheme::detect(https, Some(state.port));

    match query.get(&state.uri_param) {
        Some(path) => RequestEnvironment::from_uri_param(Some(path.as_str()), host, scheme),
        None => RequestEnvironment::new(uri.path(), host, scheme),
    }
}

fn error_response(err: &HiveError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(err.to_html())).into_response()
}
