//! Reference service: a small demo application served behind the gate.

use crate::gate::layer::{self, GateState};
use crate::pordisto::handlers::{health, pages};
use anyhow::Result;
use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Method, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod handlers;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health::health),
    components(schemas(handlers::health::Health)),
    tags(
        (name = "pordisto", description = "Cookie authentication gate"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the demo application router with the gate layered on.
///
/// `/health` is mounted after the layer stack so probes bypass the gate and
/// the tracing middleware entirely; the boundary would skip it anyway.
#[must_use]
pub fn router(state: Arc<GateState>) -> Router {
    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);

    Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::index))
        .route("/login", get(pages::login))
        .route("/warning", get(pages::warning))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(middleware::from_fn_with_state(state, layer::require_auth)),
        )
        .route("/health", get(health::health))
}

/// Bind and serve until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn new(port: u16, state: Arc<GateState>) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Gracefully shutdown");
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let headers = request.headers();
    let path = request.uri().path();
    let request_id = headers
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, ?headers, request_id)
}
