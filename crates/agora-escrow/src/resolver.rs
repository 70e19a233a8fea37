//! ResolverClient - submits binding dispute outcomes
//!
//! Requires the resolver role on the resolver contract; the ledger rejects
//! unauthorized submissions, which surfaces here as a revert. The only
//! client-side guard is the split arithmetic: buyer and seller percentages
//! must sum to exactly 100.

use std::sync::Arc;

use agora_chain::{escrow_id, ChainClient, ChainProfile, ContractCall};
use agora_types::{Address, AgoraError, DisputeOutcome, Result, TxHash};
use tracing::info;

/// Client for the dispute resolver contract
pub struct ResolverClient {
    chain: Arc<dyn ChainClient>,
    address: Address,
}

impl ResolverClient {
    /// Create a client over a chain backend and profile
    pub fn new(chain: Arc<dyn ChainClient>, profile: &ChainProfile) -> Self {
        Self {
            chain,
            address: profile.resolver,
        }
    }

    /// Submit a binding resolution for a disputed escrow
    ///
    /// `buyer_percent + seller_percent` must equal 100; any other split is
    /// rejected before the call leaves the process.
    pub async fn submit_resolution(
        &self,
        transaction_id: &str,
        outcome: DisputeOutcome,
        buyer_percent: u8,
        seller_percent: u8,
        reasoning: &str,
    ) -> Result<TxHash> {
        if u32::from(buyer_percent) + u32::from(seller_percent) != 100 {
            return Err(AgoraError::validation(
                "split",
                format!(
                    "buyer_percent ({buyer_percent}) + seller_percent ({seller_percent}) must equal 100"
                ),
            ));
        }

        let id = escrow_id(transaction_id);
        info!(
            %transaction_id,
            escrow_id = %id,
            outcome = outcome.code(),
            buyer_percent,
            seller_percent,
            "submitting dispute resolution"
        );

        let call = ContractCall::new("submitResolution")
            .hash(id)
            .uint(outcome.code() as u128)
            .uint(buyer_percent as u128)
            .uint(seller_percent as u128)
            .str(reasoning);
        Ok(self.chain.send(self.address, call).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_chain::{CallValue, TokenInfo};
    use agora_types::{Hash32, LedgerError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingChain {
        sent: Mutex<Vec<ContractCall>>,
    }

    #[async_trait]
    impl ChainClient for RecordingChain {
        async fn send(
            &self,
            _to: Address,
            call: ContractCall,
        ) -> std::result::Result<TxHash, LedgerError> {
            self.sent.lock().unwrap().push(call);
            Ok(Hash32::new([0xbb; 32]))
        }

        async fn read(
            &self,
            _to: Address,
            _call: ContractCall,
        ) -> std::result::Result<Vec<CallValue>, LedgerError> {
            Ok(vec![])
        }
    }

    fn profile() -> ChainProfile {
        ChainProfile {
            chain_id: agora_chain::BASE_SEPOLIA_CHAIN_ID,
            escrow: Address::new([0x10; 20]),
            score: Address::new([0x20; 20]),
            resolver: Address::new([0x30; 20]),
            token: TokenInfo {
                address: Address::new([0x40; 20]),
                decimals: 6,
                symbol: "USDC".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_split_must_sum_to_100() {
        let chain = Arc::new(RecordingChain {
            sent: Mutex::new(Vec::new()),
        });
        let client = ResolverClient::new(chain.clone(), &profile());

        for (buyer, seller) in [(50u8, 49u8), (0, 0), (100, 100), (60, 50)] {
            let err = client
                .submit_resolution("clx0000001", DisputeOutcome::Split, buyer, seller, "test")
                .await
                .unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_ERROR");
        }
        assert!(chain.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_valid_split_submits() {
        let chain = Arc::new(RecordingChain {
            sent: Mutex::new(Vec::new()),
        });
        let client = ResolverClient::new(chain.clone(), &profile());

        client
            .submit_resolution(
                "clx0000001",
                DisputeOutcome::Split,
                30,
                70,
                "partial delivery confirmed",
            )
            .await
            .unwrap();

        let sent = chain.sent.lock().unwrap();
        assert_eq!(sent[0].function, "submitResolution");
        assert_eq!(sent[0].args[1], CallValue::Uint(3));
        assert_eq!(sent[0].args[2], CallValue::Uint(30));
        assert_eq!(sent[0].args[3], CallValue::Uint(70));
    }

    #[tokio::test]
    async fn test_full_refund_split() {
        let chain = Arc::new(RecordingChain {
            sent: Mutex::new(Vec::new()),
        });
        let client = ResolverClient::new(chain.clone(), &profile());

        client
            .submit_resolution(
                "clx0000001",
                DisputeOutcome::BuyerRefund,
                100,
                0,
                "seller never responded",
            )
            .await
            .unwrap();
        assert_eq!(chain.sent.lock().unwrap().len(), 1);
    }
}
