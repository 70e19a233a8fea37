//! Webhook signature scheme
//!
//! Header format: `t=<unix_seconds>,v1=<hex_hmac>`
//! Signed payload: `"<timestamp>.<body>"`
//!
//! The timestamp bounds replay: deliveries outside the tolerance window are
//! invalid even with a correct MAC. Comparison is length-checked and
//! constant-time.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "X-Agora-Signature";

/// Maximum accepted clock skew / delivery age in seconds
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Build a signature header for a body at a timestamp
///
/// Used by tests and by anything emitting platform-compatible webhooks.
pub fn signature_header(body: &str, timestamp: i64, secret: &str) -> String {
    let mac = hmac_hex(secret, &format!("{timestamp}.{body}")).unwrap_or_default();
    format!("t={timestamp},v1={mac}")
}

/// Verify a webhook signature against the current clock
///
/// Total over all string inputs - malformed headers, bad timestamps, and
/// wrong-length signatures are all simply invalid.
pub fn verify_signature(body: &str, header: &str, secret: &str, tolerance_secs: i64) -> bool {
    verify_signature_at(body, header, secret, tolerance_secs, Utc::now().timestamp())
}

/// Verify a webhook signature against an explicit clock reading
pub fn verify_signature_at(
    body: &str,
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> bool {
    let t_part = header.split(',').find_map(|p| p.strip_prefix("t="));
    let v1_part = header.split(',').find_map(|p| p.strip_prefix("v1="));
    let (Some(t_part), Some(provided)) = (t_part, v1_part) else {
        return false;
    };

    let Ok(timestamp) = t_part.parse::<i64>() else {
        return false;
    };
    if (now - timestamp).abs() > tolerance_secs {
        return false;
    }

    let Some(expected) = hmac_hex(secret, &format!("{timestamp}.{body}")) else {
        return false;
    };

    // Length check first - constant-time comparison needs equal lengths
    if provided.len() != expected.len() {
        return false;
    }
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn hmac_hex(secret: &str, message: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(message.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
