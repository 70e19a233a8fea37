//! Escrow types for Agora
//!
//! An escrow is a ledger-held lock of funds for one marketplace transaction.
//! The record lives on-chain; these types mirror what the ledger returns and
//! carry the status codes the contract uses on the wire.

use crate::{Address, Amount, Hash32};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an escrow, with the contract's u8 wire codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Never created
    None,
    /// Funds locked, awaiting delivery
    Funded,
    /// Delivery proof submitted, dispute window running
    Delivered,
    /// Funds paid to the seller
    Released,
    /// Funds returned to the buyer
    Refunded,
    /// Buyer contested within the dispute window
    Disputed,
    /// Resolver submitted a binding split
    Resolved,
    /// Reclaimed by the buyer after the seller never delivered
    Abandoned,
}

impl EscrowStatus {
    /// Decode from the contract's wire code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Funded),
            2 => Some(Self::Delivered),
            3 => Some(Self::Released),
            4 => Some(Self::Refunded),
            5 => Some(Self::Disputed),
            6 => Some(Self::Resolved),
            7 => Some(Self::Abandoned),
            _ => None,
        }
    }

    /// The contract's wire code
    pub fn code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Funded => 1,
            Self::Delivered => 2,
            Self::Released => 3,
            Self::Refunded => 4,
            Self::Disputed => 5,
            Self::Resolved => 6,
            Self::Abandoned => 7,
        }
    }

    /// Check if this is a terminal state
    ///
    /// The ledger never moves an escrow out of a terminal state; clients may
    /// rely on this to stop watching.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Released | Self::Refunded | Self::Resolved | Self::Abandoned
        )
    }

    /// Check if funds are still locked by the ledger
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Funded | Self::Delivered | Self::Disputed)
    }
}

/// Full on-chain escrow record as returned by the ledger's `getEscrow`
///
/// Timestamps and durations are unix seconds, matching the ledger word size.
/// A zero `buyer` address from the ledger means the escrow was never created;
/// read paths surface that as `None` rather than handing out this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowDetails {
    /// Settlement token
    pub token: Address,
    /// Funding party
    pub buyer: Address,
    /// Delivering party
    pub seller: Address,
    /// Amount locked for the seller
    pub locked_amount: Amount,
    /// Fee charged on top at funding time (2% of locked_amount)
    pub platform_fee: Amount,
    /// Current lifecycle status
    pub status: EscrowStatus,
    /// When the escrow was funded
    pub created_at: u64,
    /// Delivery deadline
    pub deadline: u64,
    /// Seconds after delivery during which the buyer may dispute
    pub dispute_window: u64,
    /// Seconds after the deadline before the buyer may reclaim
    pub abandonment_grace: u64,
    /// When delivery was submitted (zero until then)
    pub delivered_at: u64,
    /// Hash of the delivery proof, if submitted
    pub proof_hash: Option<Hash32>,
    /// Hash of machine-checkable success criteria, if any
    pub criteria_hash: Option<Hash32>,
}

impl EscrowDetails {
    /// End of the dispute window, if delivery has happened
    pub fn dispute_window_ends_at(&self) -> Option<u64> {
        if self.delivered_at == 0 {
            None
        } else {
            Some(self.delivered_at + self.dispute_window)
        }
    }

    /// Earliest moment an undelivered escrow may be reclaimed
    pub fn abandonment_claimable_at(&self) -> u64 {
        self.deadline + self.abandonment_grace
    }
}

/// Outcome of a dispute resolution, with the contract's u8 wire codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeOutcome {
    /// No outcome recorded
    None,
    /// Full refund to the buyer
    BuyerRefund,
    /// Full payment to the seller
    SellerPaid,
    /// Percentage split between the parties
    Split,
}

impl DisputeOutcome {
    /// The contract's wire code
    pub fn code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::BuyerRefund => 1,
            Self::SellerPaid => 2,
            Self::Split => 3,
        }
    }
}
