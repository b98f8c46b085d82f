//! Minimal demo pages. The protected page stands in for the application the
//! gate fronts; `/login` and `/warning` are the gate's redirect destinations.
//! Cookie issuance belongs to the real login flow and is not served here.

use axum::{
    extract::Query,
    response::{Html, IntoResponse},
};
use serde::Deserialize;

/// Protected page; only reachable with a valid credential.
pub async fn index() -> impl IntoResponse {
    Html("<h1>pordisto</h1><p>You are authenticated.</p>")
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    redirect: Option<String>,
}

/// Login destination. Renders the return target so a real login form can
/// send the client back where it came from.
pub async fn login(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let target = query.redirect.as_deref().unwrap_or("/");
    Html(format!(
        "<h1>Sign in</h1><p>After signing in you will return to <code>{}</code>.</p>",
        escape(target)
    ))
}

/// Warning destination for mis-provisioned deployments.
pub async fn warning() -> impl IntoResponse {
    Html(
        "<h1>Server misconfigured</h1>\
         <p>The server secret is not set. Configure it and restart the service.</p>",
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
