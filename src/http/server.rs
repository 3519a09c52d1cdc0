//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Evaluate the legacy redirect table before anything else
//! - Forward non-redirected traffic to the rendering origin
//! - Serve the content API (related posts, category/tag listings)
//! - Observability (metrics, correlation IDs)

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        HeaderValue, Request, Uri,
    },
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::config::GatewayConfig;
use crate::content::{ContentIndex, ContentItem, Language};
use crate::http::request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
use crate::http::response::{bad_gateway, not_found, permanent_redirect, PostSummary};
use crate::lifecycle::ShutdownHandle;
use crate::observability::metrics;
use crate::redirect::RedirectEngine;
use crate::related::{posts_in_category, posts_with_tag, related_posts};

/// Errors surfaced while assembling the server from config.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Upstream origin could not be turned into a forwarding target.
    #[error("invalid upstream origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub redirects: Option<Arc<RedirectEngine>>,
    pub content: Arc<ContentIndex>,
    pub client: Client<HttpConnector, Body>,
    pub upstream_scheme: Scheme,
    pub upstream_authority: Authority,
    pub related_limit: usize,
}

/// HTTP server for the locale gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and content.
    pub fn new(config: GatewayConfig, content: Arc<ContentIndex>) -> Result<Self, ServerError> {
        let (upstream_scheme, upstream_authority) = parse_origin(&config.upstream.origin)?;

        let redirects = config
            .redirects
            .enabled
            .then(|| Arc::new(RedirectEngine::from_config(&config.redirects)));

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.upstream.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            redirects,
            content,
            client,
            upstream_scheme,
            upstream_authority,
            related_limit: config.content.related_limit,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/related/{id}", get(related_handler))
            .route("/api/posts/category/{slug}", get(category_handler))
            .route("/api/posts/tag/{slug}", get(tag_handler))
            .route("/", any(gateway_handler))
            .route("/{*path}", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownHandle,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.triggered())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Turn the configured origin URL into the scheme/authority pair used to
/// rewrite forwarded request URIs.
fn parse_origin(origin: &str) -> Result<(Scheme, Authority), ServerError> {
    let invalid = |reason: String| ServerError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    let url = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
    let scheme = match url.scheme() {
        "http" => Scheme::HTTP,
        "https" => Scheme::HTTPS,
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    };
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    let authority_str = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let authority =
        Authority::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;
    Ok((scheme, authority))
}

/// Main gateway handler: issue a legacy redirect or forward to the origin.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();

    if let Some(engine) = &state.redirects {
        if let Some(action) = engine.evaluate(&path, &query) {
            let location = if query.is_empty() {
                action.target.clone()
            } else {
                format!("{}?{}", action.target, query)
            };
            tracing::info!(
                request_id = %request_id,
                path = %path,
                rule = action.rule,
                target = %location,
                "Legacy redirect"
            );
            metrics::record_redirect(action.rule);
            metrics::record_request(&method, action.status, start_time);
            return permanent_redirect(&location);
        }
    }

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Forwarding to origin"
    );
    let response = forward_to_origin(&state, request, &request_id).await;
    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}

/// Rewrite the request URI onto the upstream origin and forward it.
async fn forward_to_origin(
    state: &AppState,
    request: Request<Body>,
    request_id: &str,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(state.upstream_scheme.clone());
    uri_parts.authority = Some(state.upstream_authority.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    let uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            return bad_gateway();
        }
    };
    parts.uri = uri;

    // Propagate the correlation id to the origin.
    if let Ok(value) = HeaderValue::from_str(request_id) {
        parts.headers.insert(X_REQUEST_ID, value);
    }

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            metrics::record_upstream_error();
            bad_gateway()
        }
    }
}

/// Liveness probe.
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "content_items": state.content.len(),
    }))
}

#[derive(Debug, Deserialize)]
struct RelatedParams {
    limit: Option<usize>,
}

/// Ranked related posts for one subject post.
async fn related_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<RelatedParams>,
) -> Response {
    let Some(subject) = state.content.get(id) else {
        return not_found("unknown content id");
    };
    let limit = params.limit.unwrap_or(state.related_limit);
    let related = related_posts(subject, state.content.items(), limit);
    Json(summaries(related)).into_response()
}

#[derive(Debug, Deserialize)]
struct ListingParams {
    lang: Option<Language>,
    limit: Option<usize>,
}

/// Posts in a category, newest first.
async fn category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Response {
    let language = params.lang.unwrap_or(Language::Uk);
    let limit = params.limit.unwrap_or(state.related_limit);
    let posts = posts_in_category(state.content.items(), language, &slug, limit);
    Json(summaries(posts)).into_response()
}

/// Posts carrying a tag, newest first.
async fn tag_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Response {
    let language = params.lang.unwrap_or(Language::Uk);
    let limit = params.limit.unwrap_or(state.related_limit);
    let posts = posts_with_tag(state.content.items(), language, &slug, limit);
    Json(summaries(posts)).into_response()
}

fn summaries(items: Vec<&ContentItem>) -> Vec<PostSummary> {
    items.into_iter().map(PostSummary::from).collect()
}
