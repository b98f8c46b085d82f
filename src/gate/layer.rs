//! Axum middleware adapting the gate decision to HTTP responses.

use crate::gate::{self, policy::RouteBoundary, Decision, GateConfig};
use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, LOCATION},
        HeaderMap, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

/// Name of the cookie carrying the credential.
pub const AUTH_COOKIE: &str = "auth";
/// Destination for unauthenticated browser requests.
pub const LOGIN_PATH: &str = "/login";
/// Destination when the server secret is not provisioned.
pub const WARNING_PATH: &str = "/warning";

/// Shared state for the gate middleware: the immutable configuration plus
/// the route boundary. Built once at startup, shared via `Arc`.
#[derive(Debug, Clone)]
pub struct GateState {
    pub config: GateConfig,
    pub boundary: RouteBoundary,
}

impl GateState {
    #[must_use]
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            boundary: RouteBoundary::default(),
        }
    }
}

/// Gate middleware for `axum::middleware::from_fn_with_state`.
///
/// Boundary routes pass through before the gate runs; everything else is
/// evaluated and mapped to passthrough, a login/warning redirect, or a 401.
pub async fn require_auth(
    State(state): State<Arc<GateState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if state.boundary.skips(&path) {
        return next.run(request).await;
    }

    let query = request.uri().query().map(ToString::to_string);
    let cookie = auth_cookie(request.headers());

    match gate::evaluate(&path, query.as_deref(), cookie.as_deref(), &state.config) {
        Decision::Allow => next.run(request).await,
        Decision::MissingSecret => {
            error!(%path, "server secret is not configured, failing closed");
            found(WARNING_PATH.to_string())
        }
        Decision::Unauthenticated { target } => {
            debug!(%path, "unauthenticated request denied");
            if target.starts_with("/api") {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            } else {
                found(login_redirect(&target))
            }
        }
    }
}

/// `/login?redirect=<target>` with the target form-urlencoded, matching what
/// a browser's `URLSearchParams` produces.
fn login_redirect(target: &str) -> String {
    let mut location = format!("{LOGIN_PATH}?");
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", target)
        .finish();
    location.push_str(&query);
    location
}

/// 302 Found. `Redirect::temporary` would emit 307, which replays request
/// bodies; the login flow wants the browser to come back with a GET.
fn found(location: String) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    match HeaderValue::from_str(&location) {
        Ok(value) => {
            response.headers_mut().insert(LOCATION, value);
        }
        Err(err) => {
            debug!("invalid redirect location {location:?}: {err}");
        }
    }
    response
}

/// Pull the `auth` cookie value out of the request's `Cookie` headers.
fn auth_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == AUTH_COOKIE).then(|| value.to_string())
        })
}
