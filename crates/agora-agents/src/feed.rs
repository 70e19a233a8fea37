//! The purchase-discovery feed
//!
//! The marketplace REST surface is an external collaborator; the core only
//! consumes this slice of it. Implementations wrap whatever transport the
//! deployment uses.

use agora_types::{Result, Transaction, TransactionPage, TransactionQuery};
use async_trait::async_trait;

/// Paged query surface of the marketplace transaction API
#[async_trait]
pub trait PurchaseFeed: Send + Sync {
    /// List transactions matching a role/status filter
    async fn list(&self, query: TransactionQuery) -> Result<TransactionPage>;

    /// Record an off-chain delivery payload for a transaction
    async fn deliver(
        &self,
        transaction_id: &str,
        response_payload: serde_json::Value,
    ) -> Result<Transaction>;
}
