//! Credential extraction from the raw `auth` cookie value.

use serde_json::{Map, Value};

/// Decoded payload of the `auth` cookie. Which fields must be present
/// depends on the active [`AuthMode`](crate::gate::AuthMode); the extractor
/// itself accepts any subset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Credential {
    pub password: Option<String>,
    pub username: Option<String>,
    pub signature: Option<String>,
}

/// Parse a credential out of the raw cookie value.
///
/// The value is percent-decoded and parsed as a JSON object. Any failure on
/// the way (missing cookie, invalid UTF-8 after decoding, invalid JSON,
/// non-object JSON) yields `None`: malformed credentials are
/// indistinguishable from missing ones to the caller. Fields of the wrong
/// JSON type degrade to `None` individually; unknown keys are ignored.
#[must_use]
pub fn extract(raw: Option<&str>) -> Option<Credential> {
    let raw = raw?;
    let decoded = urlencoding::decode(raw).ok()?;
    let value: Value = serde_json::from_str(&decoded).ok()?;
    let object = value.as_object()?;

    Some(Credential {
        password: string_field(object, "password"),
        username: string_field(object, "username"),
        signature: string_field(object, "signature"),
    })
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(extract(None), None);
    }

    #[test]
    fn round_trip_reproduces_fields() {
        let json = r#"{"username":"alice","signature":"deadbeef"}"#;
        let encoded = urlencoding::encode(json);
        let credential = extract(Some(&encoded)).expect("credential");

        assert_eq!(credential.username.as_deref(), Some("alice"));
        assert_eq!(credential.signature.as_deref(), Some("deadbeef"));
        assert_eq!(credential.password, None);
    }

    #[test]
    fn password_round_trip() {
        let json = r#"{"password":"s3cret with spaces"}"#;
        let encoded = urlencoding::encode(json);
        let credential = extract(Some(&encoded)).expect("credential");

        assert_eq!(credential.password.as_deref(), Some("s3cret with spaces"));
    }

    #[test]
    fn invalid_json_yields_none() {
        assert_eq!(extract(Some("not%20json")), None);
    }

    #[test]
    fn truncated_percent_escape_yields_none() {
        // The dangling escape never decodes into valid JSON.
        assert_eq!(extract(Some("%7B%22password%22%3A%2")), None);
    }

    #[test]
    fn non_object_json_yields_none() {
        assert_eq!(extract(Some("%22hello%22")), None);
        assert_eq!(extract(Some("42")), None);
        assert_eq!(extract(Some("null")), None);
    }

    #[test]
    fn wrong_typed_field_degrades_to_none() {
        let json = r#"{"password":42,"username":"alice"}"#;
        let encoded = urlencoding::encode(json);
        let credential = extract(Some(&encoded)).expect("credential");

        assert_eq!(credential.password, None);
        assert_eq!(credential.username.as_deref(), Some("alice"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let json = r#"{"password":"x","role":"admin"}"#;
        let encoded = urlencoding::encode(json);
        let credential = extract(Some(&encoded)).expect("credential");

        assert_eq!(credential.password.as_deref(), Some("x"));
    }
}
