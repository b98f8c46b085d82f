//! HMAC-SHA256 signature verification for signature-mode credentials.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify `signature_hex` as the HMAC-SHA256 of `message` keyed by `secret`.
///
/// The MAC comparison is constant-time (`Mac::verify_slice`). This function
/// never fails: malformed hex, an empty decode, and MAC construction failure
/// all collapse to `false`.
#[must_use]
pub fn verify(message: &str, signature_hex: &str, secret: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex) else {
        return false;
    };
    if expected.is_empty() {
        return false;
    }

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(message.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Produce the hex-encoded HMAC-SHA256 of `message` keyed by `secret`, the
/// counterpart of [`verify`] used when issuing signature-mode cookies.
#[must_use]
pub fn sign(message: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
