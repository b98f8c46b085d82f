//! # Pordisto (Cookie Authentication Gate)
//!
//! `pordisto` decides, per inbound HTTP request, whether the caller is
//! authenticated before the request reaches application logic. The decision is
//! made from a single `auth` cookie carrying a percent-encoded JSON record.
//!
//! ## Authentication modes
//!
//! A deployment runs in exactly one of two modes, selected once at startup:
//!
//! - **Password mode** (`--storage-type localstorage`): the cookie carries a
//!   `password` field compared against the shared server secret.
//! - **Signature mode** (any other storage type): the cookie carries
//!   `username` + `signature`, where the signature is an HMAC-SHA256 over the
//!   username keyed by the shared server secret.
//!
//! ## Fail closed
//!
//! When the server secret is not provisioned the gate refuses to authenticate
//! anything: every gated request is redirected to `/warning` so the operator
//! fault is visible, instead of bouncing users to a login page that cannot
//! succeed.
//!
//! ## Decision mapping
//!
//! - Allow: the request passes through unmodified.
//! - Unauthenticated on an `/api` path: `401` with body `Unauthorized`.
//! - Unauthenticated elsewhere: `302` to `/login?redirect=<original path+query>`.
//!
//! The gate core ([`gate`]) is a plain library with no I/O; [`gate::layer`]
//! adapts it to axum middleware and [`pordisto`] ships a reference service
//! around it.

pub mod cli;
pub mod gate;
pub mod pordisto;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
