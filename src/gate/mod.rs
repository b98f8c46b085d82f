//! Gate core: the pure decision function and its supporting pieces.
//!
//! Nothing in this module performs I/O. The configuration is built once at
//! startup and passed in explicitly, so the same inputs always produce the
//! same [`Decision`].

pub mod credentials;
pub mod layer;
pub mod policy;
pub mod signature;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Deployment-wide authentication mode, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Exact match of the cookie `password` field against the server secret.
    Password,
    /// HMAC-SHA256 signature over the cookie `username`, keyed by the secret.
    Signature,
}

impl AuthMode {
    /// Map the configured storage type to a mode: `localstorage` deployments
    /// keep the shared password in the cookie, everything else signs per user.
    #[must_use]
    pub fn from_storage_type(storage_type: &str) -> Self {
        if storage_type == "localstorage" {
            Self::Password
        } else {
            Self::Signature
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Signature => "signature",
        }
    }
}

/// Immutable gate configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct GateConfig {
    mode: AuthMode,
    secret: Option<SecretString>,
}

impl GateConfig {
    /// A `None` secret is a mis-provisioned deployment: the gate still runs
    /// but fails closed (see [`Decision::MissingSecret`]).
    #[must_use]
    pub const fn new(mode: AuthMode, secret: Option<SecretString>) -> Self {
        Self { mode, secret }
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub const fn has_secret(&self) -> bool {
        self.secret.is_some()
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request may proceed to application logic.
    Allow,
    /// The server secret is not provisioned; operator fault, not a
    /// credential failure.
    MissingSecret,
    /// No credential, a malformed credential, or an invalid one. `target`
    /// carries the original path plus query string so the login redirect can
    /// restore it.
    Unauthenticated { target: String },
}

/// Evaluate the gate for one request.
///
/// Steps short-circuit in order: path exemption, secret provisioning,
/// credential extraction, then mode-specific validation. Malformed and
/// invalid credentials are indistinguishable from missing ones in the
/// outcome.
#[must_use]
pub fn evaluate(
    path: &str,
    query: Option<&str>,
    cookie: Option<&str>,
    config: &GateConfig,
) -> Decision {
    if policy::is_exempt(path) {
        return Decision::Allow;
    }

    let Some(secret) = config.secret.as_ref() else {
        return Decision::MissingSecret;
    };
    let secret = secret.expose_secret();

    let target = match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    };

    let Some(credential) = credentials::extract(cookie) else {
        return Decision::Unauthenticated { target };
    };

    let authenticated = match config.mode {
        AuthMode::Password => credential
            .password
            .as_deref()
            .is_some_and(|password| bool::from(password.as_bytes().ct_eq(secret.as_bytes()))),
        AuthMode::Signature => {
            match (credential.username.as_deref(), credential.signature.as_deref()) {
                (Some(username), Some(signature)) => {
                    signature::verify(username, signature, secret)
                }
                // Missing either field denies without attempting verification
                _ => false,
            }
        }
    };

    if authenticated {
        Decision::Allow
    } else {
        Decision::Unauthenticated { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_config(secret: &str) -> GateConfig {
        GateConfig::new(AuthMode::Password, Some(SecretString::from(secret.to_string())))
    }

    fn signature_config(secret: &str) -> GateConfig {
        GateConfig::new(AuthMode::Signature, Some(SecretString::from(secret.to_string())))
    }

    fn cookie(json: &str) -> String {
        urlencoding::encode(json).into_owned()
    }

    #[test]
    fn exempt_path_allows_without_cookie_or_secret() {
        let config = GateConfig::new(AuthMode::Password, None);
        assert_eq!(
            evaluate("/_next/static/app.js", None, None, &config),
            Decision::Allow
        );
    }

    #[test]
    fn missing_secret_beats_valid_credential() {
        let config = GateConfig::new(AuthMode::Password, None);
        let cookie = cookie(r#"{"password":"hunter2"}"#);
        assert_eq!(
            evaluate("/dashboard", None, Some(&cookie), &config),
            Decision::MissingSecret
        );
    }

    #[test]
    fn password_mode_exact_match_allows() {
        let config = password_config("hunter2");
        let cookie = cookie(r#"{"password":"hunter2"}"#);
        assert_eq!(
            evaluate("/dashboard", None, Some(&cookie), &config),
            Decision::Allow
        );
    }

    #[test]
    fn password_mode_wrong_password_denies() {
        let config = password_config("hunter2");
        let cookie = cookie(r#"{"password":"hunter3"}"#);
        assert_eq!(
            evaluate("/dashboard", Some("x=1"), Some(&cookie), &config),
            Decision::Unauthenticated {
                target: "/dashboard?x=1".to_string()
            }
        );
    }

    #[test]
    fn missing_cookie_denies_with_target() {
        let config = password_config("hunter2");
        assert_eq!(
            evaluate("/dashboard", Some("x=1"), None, &config),
            Decision::Unauthenticated {
                target: "/dashboard?x=1".to_string()
            }
        );
    }

    #[test]
    fn signature_mode_valid_signature_allows() {
        let config = signature_config("hunter2");
        let mac = signature::sign("alice", "hunter2");
        let cookie = cookie(&format!(
            r#"{{"username":"alice","signature":"{mac}"}}"#
        ));
        assert_eq!(
            evaluate("/dashboard", None, Some(&cookie), &config),
            Decision::Allow
        );
    }

    #[test]
    fn signature_mode_mutated_signature_denies() {
        let config = signature_config("hunter2");
        let mut mac = signature::sign("alice", "hunter2");
        let flipped = if mac.starts_with('0') { "1" } else { "0" };
        mac.replace_range(0..1, flipped);
        let cookie = cookie(&format!(
            r#"{{"username":"alice","signature":"{mac}"}}"#
        ));
        assert_eq!(
            evaluate("/dashboard", None, Some(&cookie), &config),
            Decision::Unauthenticated {
                target: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn signature_mode_missing_fields_deny() {
        let config = signature_config("hunter2");
        let missing_signature = cookie(r#"{"username":"alice"}"#);
        let missing_username = cookie(&format!(
            r#"{{"signature":"{}"}}"#,
            signature::sign("alice", "hunter2")
        ));
        for value in [missing_signature, missing_username] {
            assert_eq!(
                evaluate("/dashboard", None, Some(&value), &config),
                Decision::Unauthenticated {
                    target: "/dashboard".to_string()
                }
            );
        }
    }

    #[test]
    fn password_fields_are_ignored_in_signature_mode() {
        let config = signature_config("hunter2");
        let cookie = cookie(r#"{"password":"hunter2"}"#);
        assert_eq!(
            evaluate("/dashboard", None, Some(&cookie), &config),
            Decision::Unauthenticated {
                target: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let config = password_config("hunter2");
        let cookie = cookie(r#"{"password":"hunter2"}"#);
        let first = evaluate("/dashboard", Some("x=1"), Some(&cookie), &config);
        let second = evaluate("/dashboard", Some("x=1"), Some(&cookie), &config);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_is_not_appended_to_target() {
        let config = password_config("hunter2");
        assert_eq!(
            evaluate("/dashboard", Some(""), None, &config),
            Decision::Unauthenticated {
                target: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn mode_from_storage_type() {
        assert_eq!(AuthMode::from_storage_type("localstorage"), AuthMode::Password);
        assert_eq!(AuthMode::from_storage_type("database"), AuthMode::Signature);
        assert_eq!(AuthMode::from_storage_type(""), AuthMode::Signature);
    }
}
