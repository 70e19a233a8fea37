//! EscrowClient - constructs lifecycle calls against the escrow contract
//!
//! One client per chain profile. Every operation derives the escrow id from
//! the platform transaction id, validates caller input locally (before any
//! network call), and submits through the `ChainClient` capability. The
//! ledger evaluates the authoritative guards; its rejections propagate
//! verbatim as `LedgerError::Reverted`.

use std::sync::Arc;

use agora_chain::{escrow_id, CallValue, ChainClient, ChainProfile, ContractCall};
use agora_types::{
    Address, AgoraError, Amount, EscrowDetails, EscrowStatus, Hash32, LedgerError, Result, TxHash,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest dispute window the platform accepts (5 minutes)
pub const MIN_DISPUTE_WINDOW_SECS: u64 = 5 * 60;
/// Longest dispute window the platform accepts (24 hours)
pub const MAX_DISPUTE_WINDOW_SECS: u64 = 24 * 60 * 60;
/// Window applied when the funding call passes zero (1 hour)
pub const DEFAULT_DISPUTE_WINDOW_SECS: u64 = 60 * 60;

/// Shortest abandonment grace the platform accepts (1 hour)
pub const MIN_ABANDONMENT_GRACE_SECS: u64 = 60 * 60;
/// Longest abandonment grace the platform accepts (30 days)
pub const MAX_ABANDONMENT_GRACE_SECS: u64 = 30 * 24 * 60 * 60;
/// Grace applied when the funding call passes zero (2 days)
pub const DEFAULT_ABANDONMENT_GRACE_SECS: u64 = 2 * 24 * 60 * 60;

/// Parameters for funding an escrow
///
/// `dispute_window` and `abandonment_grace` of zero select the contract
/// defaults; nonzero values must sit within the platform bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRequest {
    /// Platform transaction id the escrow settles
    pub transaction_id: String,
    /// Seller's wallet address
    pub seller: Address,
    /// Amount in smallest token units, exclusive of the platform fee
    pub amount: Amount,
    /// Unix-seconds delivery deadline
    pub deadline: u64,
    /// Dispute window in seconds (0 = contract default)
    pub dispute_window: u64,
    /// Abandonment grace in seconds (0 = contract default)
    pub abandonment_grace: u64,
    /// Optional commitment to machine-checkable success criteria
    pub criteria_hash: Option<Hash32>,
}

impl FundRequest {
    /// A funding request with default windows and no criteria commitment
    pub fn new(transaction_id: impl Into<String>, seller: Address, amount: Amount, deadline: u64) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            seller,
            amount,
            deadline,
            dispute_window: 0,
            abandonment_grace: 0,
            criteria_hash: None,
        }
    }
}

/// Client for the escrow contract
pub struct EscrowClient {
    chain: Arc<dyn ChainClient>,
    profile: ChainProfile,
}

impl EscrowClient {
    /// Create a client over a chain backend and profile
    pub fn new(chain: Arc<dyn ChainClient>, profile: ChainProfile) -> Self {
        Self { chain, profile }
    }

    /// The profile this client targets
    pub fn profile(&self) -> &ChainProfile {
        &self.profile
    }

    /// Approve the escrow contract to spend the settlement token
    ///
    /// Must precede `fund`, and must cover `amount + 2% fee` (see
    /// [`crate::amount_with_fee`]) or the funding call reverts downstream
    /// with an insufficient-allowance rejection.
    pub async fn approve_token(&self, amount: Amount) -> Result<TxHash> {
        let call = ContractCall::new("approve")
            .address(self.profile.escrow)
            .uint(amount.units());
        Ok(self.chain.send(self.profile.token.address, call).await?)
    }

    /// Fund an escrow, locking `amount + 2% fee` in the settlement token
    pub async fn fund(&self, request: &FundRequest) -> Result<TxHash> {
        if request.amount.is_zero() {
            return Err(AgoraError::validation("amount", "must be greater than zero"));
        }
        let now = Utc::now().timestamp() as u64;
        if request.deadline <= now {
            return Err(AgoraError::validation("deadline", "must be in the future"));
        }
        if request.dispute_window != 0
            && !(MIN_DISPUTE_WINDOW_SECS..=MAX_DISPUTE_WINDOW_SECS)
                .contains(&request.dispute_window)
        {
            return Err(AgoraError::validation(
                "dispute_window",
                format!(
                    "must be 0 (default) or between {MIN_DISPUTE_WINDOW_SECS} and {MAX_DISPUTE_WINDOW_SECS} seconds"
                ),
            ));
        }
        if request.abandonment_grace != 0
            && !(MIN_ABANDONMENT_GRACE_SECS..=MAX_ABANDONMENT_GRACE_SECS)
                .contains(&request.abandonment_grace)
        {
            return Err(AgoraError::validation(
                "abandonment_grace",
                format!(
                    "must be 0 (default) or between {MIN_ABANDONMENT_GRACE_SECS} and {MAX_ABANDONMENT_GRACE_SECS} seconds"
                ),
            ));
        }

        let id = escrow_id(&request.transaction_id);
        debug!(transaction_id = %request.transaction_id, escrow_id = %id, "funding escrow");

        let call = ContractCall::new("createEscrow")
            .hash(id)
            .address(request.seller)
            .uint(request.amount.units())
            .address(self.profile.token.address)
            .uint(request.deadline as u128)
            .uint(request.dispute_window as u128)
            .uint(request.abandonment_grace as u128)
            .hash(request.criteria_hash.unwrap_or(Hash32::ZERO));
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Submit delivery proof. Called by the seller after completing work.
    pub async fn submit_delivery(&self, transaction_id: &str, proof_hash: Hash32) -> Result<TxHash> {
        let call = ContractCall::new("submitDelivery")
            .hash(escrow_id(transaction_id))
            .hash(proof_hash);
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Accept delivery and release funds immediately. Called by the buyer.
    pub async fn accept(&self, transaction_id: &str) -> Result<TxHash> {
        let call = ContractCall::new("accept").hash(escrow_id(transaction_id));
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Finalize release after the dispute window passed without a dispute.
    /// Callable by anyone.
    pub async fn finalize_release(&self, transaction_id: &str) -> Result<TxHash> {
        let call = ContractCall::new("finalizeRelease").hash(escrow_id(transaction_id));
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Contest a delivery within the dispute window. Called by the buyer.
    pub async fn dispute(&self, transaction_id: &str) -> Result<TxHash> {
        let call = ContractCall::new("dispute").hash(escrow_id(transaction_id));
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Reclaim funds for an abandoned escrow (deadline + grace passed with
    /// no delivery). Called by the buyer.
    pub async fn claim_abandoned(&self, transaction_id: &str) -> Result<TxHash> {
        let call = ContractCall::new("claimAbandoned").hash(escrow_id(transaction_id));
        Ok(self.chain.send(self.profile.escrow, call).await?)
    }

    /// Read the full escrow record. `None` when no escrow exists for the
    /// transaction (the ledger signals this with a zero buyer address).
    pub async fn get_escrow(&self, transaction_id: &str) -> Result<Option<EscrowDetails>> {
        let call = ContractCall::new("getEscrow").hash(escrow_id(transaction_id));
        let values = self.chain.read(self.profile.escrow, call).await?;
        let details = decode_escrow(&values)?;
        if details.buyer.is_zero() {
            return Ok(None);
        }
        Ok(Some(details))
    }

    /// Advisory: is the dispute window currently open?
    pub async fn is_dispute_window_active(&self, transaction_id: &str) -> Result<bool> {
        self.read_bool("isDisputeWindowActive", transaction_id).await
    }

    /// Advisory: has the dispute window passed with no dispute filed?
    pub async fn can_finalize(&self, transaction_id: &str) -> Result<bool> {
        self.read_bool("canFinalize", transaction_id).await
    }

    /// Advisory: may the buyer reclaim an undelivered escrow?
    pub async fn can_claim_abandoned(&self, transaction_id: &str) -> Result<bool> {
        self.read_bool("canClaimAbandoned", transaction_id).await
    }

    async fn read_bool(&self, function: &str, transaction_id: &str) -> Result<bool> {
        let call = ContractCall::new(function).hash(escrow_id(transaction_id));
        let values = self.chain.read(self.profile.escrow, call).await?;
        values
            .first()
            .and_then(CallValue::as_bool)
            .ok_or_else(|| {
                LedgerError::Decode {
                    function: function.to_string(),
                    detail: "expected a single boolean".to_string(),
                }
                .into()
            })
    }
}

/// Decode the 13-word `getEscrow` return tuple
fn decode_escrow(values: &[CallValue]) -> std::result::Result<EscrowDetails, LedgerError> {
    let decode_err = |detail: &str| LedgerError::Decode {
        function: "getEscrow".to_string(),
        detail: detail.to_string(),
    };
    if values.len() != 13 {
        return Err(decode_err(&format!("expected 13 words, got {}", values.len())));
    }

    let addr = |i: usize, name: &str| {
        values[i]
            .as_address()
            .ok_or_else(|| decode_err(&format!("{name} is not an address")))
    };
    let uint = |i: usize, name: &str| {
        values[i]
            .as_uint()
            .ok_or_else(|| decode_err(&format!("{name} is not a uint")))
    };
    let word = |i: usize, name: &str| {
        values[i]
            .as_hash()
            .ok_or_else(|| decode_err(&format!("{name} is not a 32-byte word")))
    };

    let status_word = uint(5, "status")?;
    let status = u8::try_from(status_word)
        .ok()
        .and_then(EscrowStatus::from_code)
        .ok_or_else(|| decode_err(&format!("unknown status code {status_word}")))?;

    let optional_hash = |h: Hash32| if h.is_zero() { None } else { Some(h) };

    Ok(EscrowDetails {
        token: addr(0, "token")?,
        buyer: addr(1, "buyer")?,
        seller: addr(2, "seller")?,
        locked_amount: Amount::new(uint(3, "lockedAmount")?),
        platform_fee: Amount::new(uint(4, "platformFee")?),
        status,
        created_at: uint(6, "createdAt")? as u64,
        deadline: uint(7, "deadline")? as u64,
        dispute_window: uint(8, "disputeWindow")? as u64,
        abandonment_grace: uint(9, "abandonmentGrace")? as u64,
        delivered_at: uint(10, "deliveredAt")? as u64,
        proof_hash: optional_hash(word(11, "proofHash")?),
        criteria_hash: optional_hash(word(12, "criteriaHash")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records sends and answers reads with canned values
    struct RecordingChain {
        sent: Mutex<Vec<(Address, ContractCall)>>,
        read_reply: Vec<CallValue>,
    }

    impl RecordingChain {
        fn new(read_reply: Vec<CallValue>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                read_reply,
            }
        }
    }

    #[async_trait]
    impl ChainClient for RecordingChain {
        async fn send(&self, to: Address, call: ContractCall) -> std::result::Result<TxHash, LedgerError> {
            self.sent.lock().unwrap().push((to, call));
            Ok(Hash32::new([0xaa; 32]))
        }

        async fn read(&self, _to: Address, _call: ContractCall) -> std::result::Result<Vec<CallValue>, LedgerError> {
            Ok(self.read_reply.clone())
        }
    }

    fn test_profile() -> ChainProfile {
        ChainProfile {
            chain_id: agora_chain::BASE_SEPOLIA_CHAIN_ID,
            escrow: Address::new([0x10; 20]),
            score: Address::new([0x20; 20]),
            resolver: Address::new([0x30; 20]),
            token: agora_chain::TokenInfo {
                address: Address::new([0x40; 20]),
                decimals: 6,
                symbol: "USDC".to_string(),
            },
        }
    }

    fn future_deadline() -> u64 {
        Utc::now().timestamp() as u64 + 7 * 24 * 3600
    }

    #[tokio::test]
    async fn test_fund_builds_create_escrow_call() {
        let chain = Arc::new(RecordingChain::new(vec![]));
        let client = EscrowClient::new(chain.clone(), test_profile());

        let request = FundRequest::new("clx0000001", Address::new([5; 20]), Amount::new(500), future_deadline());
        client.fund(&request).await.unwrap();

        let sent = chain.sent.lock().unwrap();
        let (to, call) = &sent[0];
        assert_eq!(*to, test_profile().escrow);
        assert_eq!(call.function, "createEscrow");
        assert_eq!(call.args[0], CallValue::Hash(escrow_id("clx0000001")));
        assert_eq!(call.args[2], CallValue::Uint(500));
        // Zero windows select the contract defaults
        assert_eq!(call.args[5], CallValue::Uint(0));
        assert_eq!(call.args[6], CallValue::Uint(0));
        assert_eq!(call.args[7], CallValue::Hash(Hash32::ZERO));
    }

    #[tokio::test]
    async fn test_fund_rejects_zero_amount() {
        let chain = Arc::new(RecordingChain::new(vec![]));
        let client = EscrowClient::new(chain.clone(), test_profile());

        let request = FundRequest::new("clx0000001", Address::new([5; 20]), Amount::ZERO, future_deadline());
        let err = client.fund(&request).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        // Rejected before any network call
        assert!(chain.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fund_rejects_past_deadline() {
        let chain = Arc::new(RecordingChain::new(vec![]));
        let client = EscrowClient::new(chain, test_profile());

        let request = FundRequest::new("clx0000001", Address::new([5; 20]), Amount::new(500), 1_000);
        assert!(client.fund(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_fund_rejects_out_of_bounds_windows() {
        let chain = Arc::new(RecordingChain::new(vec![]));
        let client = EscrowClient::new(chain, test_profile());

        let mut request =
            FundRequest::new("clx0000001", Address::new([5; 20]), Amount::new(500), future_deadline());
        request.dispute_window = MIN_DISPUTE_WINDOW_SECS - 1;
        assert!(client.fund(&request).await.is_err());

        request.dispute_window = 0;
        request.abandonment_grace = MAX_ABANDONMENT_GRACE_SECS + 1;
        assert!(client.fund(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_get_escrow_zero_buyer_is_none() {
        let reply = vec![
            CallValue::Address(Address::new([0x40; 20])),
            CallValue::Address(Address::ZERO), // buyer - never created
            CallValue::Address(Address::ZERO),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Uint(0),
            CallValue::Hash(Hash32::ZERO),
            CallValue::Hash(Hash32::ZERO),
        ];
        let chain = Arc::new(RecordingChain::new(reply));
        let client = EscrowClient::new(chain, test_profile());

        assert_eq!(client.get_escrow("clx0000001").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_escrow_decodes_record() {
        let proof = Hash32::new([7; 32]);
        let reply = vec![
            CallValue::Address(Address::new([0x40; 20])),
            CallValue::Address(Address::new([1; 20])),
            CallValue::Address(Address::new([2; 20])),
            CallValue::Uint(500),
            CallValue::Uint(10),
            CallValue::Uint(2), // Delivered
            CallValue::Uint(1_000),
            CallValue::Uint(9_000),
            CallValue::Uint(3_600),
            CallValue::Uint(7_200),
            CallValue::Uint(5_000),
            CallValue::Hash(proof),
            CallValue::Hash(Hash32::ZERO),
        ];
        let chain = Arc::new(RecordingChain::new(reply));
        let client = EscrowClient::new(chain, test_profile());

        let details = client.get_escrow("clx0000001").await.unwrap().unwrap();
        assert_eq!(details.status, EscrowStatus::Delivered);
        assert_eq!(details.locked_amount, Amount::new(500));
        assert_eq!(details.proof_hash, Some(proof));
        assert_eq!(details.criteria_hash, None);
    }

    #[tokio::test]
    async fn test_decode_rejects_short_tuple() {
        let chain = Arc::new(RecordingChain::new(vec![CallValue::Uint(1)]));
        let client = EscrowClient::new(chain, test_profile());
        let err = client.get_escrow("clx0000001").await.unwrap_err();
        assert_eq!(err.error_code(), "LEDGER_DECODE");
    }

    #[tokio::test]
    async fn test_approve_targets_token_contract() {
        let chain = Arc::new(RecordingChain::new(vec![]));
        let client = EscrowClient::new(chain.clone(), test_profile());

        client.approve_token(Amount::new(510)).await.unwrap();
        let sent = chain.sent.lock().unwrap();
        let (to, call) = &sent[0];
        assert_eq!(*to, test_profile().token.address);
        assert_eq!(call.function, "approve");
        assert_eq!(call.args[0], CallValue::Address(test_profile().escrow));
        assert_eq!(call.args[1], CallValue::Uint(510));
    }
}
