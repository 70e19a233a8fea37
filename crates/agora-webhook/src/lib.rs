//! Agora Webhook - authenticated lifecycle notifications
//!
//! The platform signs outbound webhooks with HMAC-SHA256 over
//! `"<timestamp>.<body>"` and sends the result in the `X-Agora-Signature`
//! header as `t=<unix_seconds>,v1=<hex_hmac>`. This crate verifies that
//! scheme and runs the listener that feeds verified events to a handler.
//!
//! Verification is total: any malformed input is simply invalid, never a
//! panic. Signature failure and malformed JSON stay distinct - 401 versus
//! 400 - so a caller can tell a forged delivery from a broken one.

pub mod server;
pub mod signature;

pub use server::{RunningWebhookServer, WebhookConfig, WebhookHandler, WebhookServer};
pub use signature::{
    signature_header, verify_signature, verify_signature_at, DEFAULT_TOLERANCE_SECS,
    SIGNATURE_HEADER,
};
