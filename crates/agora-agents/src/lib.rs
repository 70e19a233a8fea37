//! Agora Agents - reference buyer and seller flows
//!
//! The seller lists work off-platform, discovers purchases through the
//! polling loop, delivers, and gets paid from escrow. The buyer funds
//! escrow, then accepts, disputes, or reclaims. Both sides drive the same
//! lifecycle clients from `agora-escrow`; this crate adds the discovery
//! loop and the wallet plumbing around them.

pub mod buyer;
pub mod feed;
pub mod poller;
pub mod seller;

pub use buyer::BuyerAgent;
pub use feed::PurchaseFeed;
pub use poller::{PollConfig, PollHandle, PurchasePoller};
pub use seller::SellerAgent;

use agora_types::AgoraError;
use thiserror::Error;

/// Errors that can occur in agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// On-chain operations need a provisioned wallet
    #[error("wallet not initialized - call init_wallet() first")]
    WalletNotInitialized,

    /// A core operation failed
    #[error(transparent)]
    Agora(#[from] AgoraError),
}

impl From<agora_types::LedgerError> for AgentError {
    fn from(err: agora_types::LedgerError) -> Self {
        Self::Agora(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
