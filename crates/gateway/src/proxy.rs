use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error, info, warn};

use crate::config::GatewayConfig;
use crate::identity;
use crate::observability::{
    IDENTITY_RELAYED_TOTAL, NO_ROUTE_TOTAL, REQUESTS_TOTAL, REQUEST_DURATION,
    UPSTREAM_ERRORS_TOTAL,
};
use crate::relay::{standard_pipeline, RequestInterceptor};
use crate::routing;

const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Shared gateway state: hot-swappable config, the shared HTTP client,
/// and the fixed interceptor pipeline.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<ArcSwap<GatewayConfig>>,
    pub client: reqwest::Client,
    pub interceptors: Arc<Vec<Box<dyn RequestInterceptor>>>,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            client: reqwest::Client::new(),
            interceptors: Arc::new(standard_pipeline()),
        }
    }
}

// Hop-by-hop headers are never forwarded in either direction.
// Content-length is recomputed by the HTTP layer after buffering.
const SKIP_HEADERS: [&str; 9] = [
    "connection",
    "proxy-connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "content-length",
];

fn skip_header(name: &HeaderName) -> bool {
    SKIP_HEADERS.iter().any(|h| name.as_str().eq_ignore_ascii_case(h))
}

fn gateway_error(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({ "error": msg }))).into_response()
}

/// Fallback handler: resolve the route, resolve the caller, run the
/// interceptor pipeline, forward once, and relay the response
/// unchanged. Failures are terminal for the request.
pub async fn forward(State(state): State<GatewayState>, req: Request) -> Response {
    let started = Instant::now();
    REQUESTS_TOTAL.inc();

    let (parts, body) = req.into_parts();
    // full load: the handler holds the snapshot across await points
    let config = state.config.load_full();

    let rule = match routing::resolve(&config.routes, parts.uri.path()) {
        Some(rule) => rule.clone(),
        None => {
            NO_ROUTE_TOTAL.inc();
            warn!(path = %parts.uri.path(), "no route matched");
            return gateway_error(StatusCode::NOT_FOUND, "no route");
        }
    };

    let identity = identity::resolve(&parts.headers, &config.session);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to buffer request body");
            return gateway_error(StatusCode::BAD_REQUEST, "unreadable request body");
        }
    };

    // The destination is rewritten; path and query are not.
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!("{}{}", rule.target.trim_end_matches('/'), path_and_query);

    let mut headers = HeaderMap::new();
    for (name, value) in parts.headers.iter() {
        if skip_header(name) || *name == header::HOST {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    for interceptor in state.interceptors.iter() {
        interceptor.apply(&mut headers, &identity);
    }
    if identity.is_authenticated() {
        IDENTITY_RELAYED_TOTAL.inc();
    }

    debug!(service = %rule.service, %url, authenticated = identity.is_authenticated(), "forwarding request");

    let upstream = state
        .client
        .request(parts.method.clone(), &url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            UPSTREAM_ERRORS_TOTAL.inc();
            error!(service = %rule.service, error = %e, "backend unreachable");
            return gateway_error(StatusCode::BAD_GATEWAY, "backend unreachable");
        }
    };

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers().iter() {
        if skip_header(name) {
            continue;
        }
        response_headers.append(name.clone(), value.clone());
    }

    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            UPSTREAM_ERRORS_TOTAL.inc();
            error!(service = %rule.service, error = %e, "failed reading backend response");
            return gateway_error(StatusCode::BAD_GATEWAY, "backend response aborted");
        }
    };

    REQUEST_DURATION.observe(started.elapsed().as_secs_f64());
    info!(service = %rule.service, status = %status, "request completed");

    (status, response_headers, bytes).into_response()
}
