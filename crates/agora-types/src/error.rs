//! Error types for Agora
//!
//! All errors are explicit. Ledger failures are kept opaque but
//! distinguishable: a rejected guard and a failed transport are different
//! variants, and neither is retried by the core.

use crate::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for Agora operations
pub type Result<T> = std::result::Result<T, AgoraError>;

/// Failure of a call against the settlement ledger
///
/// `Reverted` means the ledger evaluated the call and rejected it - a guard
/// condition failed, an allowance was insufficient, a role was missing.
/// `Transport` means the call never reached a verdict. Callers that raced a
/// read-only check against the authoritative guard see the rejection here,
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger rejected the call
    #[error("ledger rejected {function}: {reason}")]
    Reverted { function: String, reason: String },

    /// The call never reached the ledger or the response was lost
    #[error("transport failure calling {function}: {message}")]
    Transport { function: String, message: String },

    /// The ledger answered but the return data did not decode
    #[error("could not decode return data from {function}: {detail}")]
    Decode { function: String, detail: String },
}

impl LedgerError {
    /// True when the ledger itself rejected the call (as opposed to the
    /// call failing to reach a verdict)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Structured shortfall breakdown carried by payment-required errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentShortfall {
    /// Amount the operation needs
    pub required: Amount,
    /// Amount available to the caller
    pub available: Amount,
    /// Settlement currency symbol
    pub currency: String,
}

/// Agora error taxonomy
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgoraError {
    /// Malformed caller input, caught before any network call
    #[error("validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Credential failure at a collaborator boundary
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// Authorization failure at a collaborator boundary
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// A referenced resource does not exist
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The caller cannot cover the operation
    #[error(
        "payment required: need {required} {currency}, have {available}",
        required = .shortfall.required,
        currency = .shortfall.currency,
        available = .shortfall.available
    )]
    PaymentRequired { shortfall: PaymentShortfall },

    /// The collaborator asked us to back off
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// An on-chain call failed; see `LedgerError` for guard-vs-transport
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AgoraError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Get a stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PaymentRequired { .. } => "PAYMENT_REQUIRED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::Ledger(LedgerError::Reverted { .. }) => "LEDGER_REVERTED",
            Self::Ledger(LedgerError::Transport { .. }) => "LEDGER_TRANSPORT",
            Self::Ledger(LedgerError::Decode { .. }) => "LEDGER_DECODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_vs_transport_stay_distinct() {
        let reverted = LedgerError::Reverted {
            function: "createEscrow".to_string(),
            reason: "insufficient allowance".to_string(),
        };
        let transport = LedgerError::Transport {
            function: "createEscrow".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(reverted.is_rejection());
        assert!(!transport.is_rejection());
        assert_eq!(AgoraError::from(reverted).error_code(), "LEDGER_REVERTED");
        assert_eq!(AgoraError::from(transport).error_code(), "LEDGER_TRANSPORT");
    }

    #[test]
    fn test_payment_shortfall_message() {
        let err = AgoraError::PaymentRequired {
            shortfall: PaymentShortfall {
                required: Amount::new(6_000_000),
                available: Amount::new(1_000_000),
                currency: "USDC".to_string(),
            },
        };
        assert_eq!(err.error_code(), "PAYMENT_REQUIRED");
        assert!(err.to_string().contains("6000000"));
    }

    #[test]
    fn test_validation_helper() {
        let err = AgoraError::validation("amount", "must be greater than zero");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
