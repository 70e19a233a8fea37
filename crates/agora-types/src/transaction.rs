//! Marketplace transaction types
//!
//! A transaction is the platform-side record of one purchase. The core does
//! not own this data - it consumes it from the purchase-discovery feed - but
//! the shape is fixed here so pollers and agents agree on it.

use serde::{Deserialize, Serialize};

/// Platform-side status of a marketplace transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Created, not yet funded
    Pending,
    /// Funds locked in escrow
    Escrowed,
    /// Seller delivered, awaiting acceptance
    Delivered,
    /// Settled to the seller
    Completed,
    /// Contested by the buyer
    Disputed,
    /// Returned to the buyer
    Refunded,
}

impl TransactionStatus {
    /// Wire name used in feed queries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Escrowed => "escrowed",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Disputed => "disputed",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a transaction a feed query filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionRole {
    Buyer,
    Seller,
}

/// One marketplace transaction as returned by the discovery feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Platform transaction id - the value escrow ids are derived from
    pub id: String,
    /// Purchasing agent
    pub buyer_id: String,
    /// Delivering agent
    pub seller_id: String,
    /// Price in marketplace units (e.g. 5.0 USDC)
    pub amount: f64,
    /// Settlement currency symbol
    pub currency: String,
    /// Current platform-side status
    pub status: TransactionStatus,
    /// The buyer's request payload, passed through to the seller
    pub request_payload: serde_json::Value,
}

/// Query parameters for the purchase-discovery feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Which side of the transaction to match
    pub role: TransactionRole,
    /// Status to scan
    pub status: TransactionStatus,
    /// Page size
    pub limit: u32,
}

/// One page of feed results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPage {
    /// Matching transactions, in feed order
    pub transactions: Vec<Transaction>,
}
