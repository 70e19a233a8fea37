//! Buyer Agent - funds escrow, then accepts, disputes, or reclaims
//!
//! The buyer flow:
//! 1. Checks the seller's reputation-derived job ceiling
//! 2. Approves the settlement token and funds the escrow
//! 3. On delivery: accepts (immediate release) or disputes within the window
//! 4. On abandonment: reclaims after deadline + grace

use std::sync::Arc;

use agora_chain::{ChainClient, ChainProfile, TokenInfo};
use agora_escrow::{amount_with_fee, EscrowClient, FundRequest, ScoreClient};
use agora_types::{
    Address, AgoraError, Amount, EscrowDetails, ResolvedGasStrategy, TxHash,
};
use agora_wallet::{provision, AccountProvider, SmartAccountConfig};
use tracing::info;

use crate::{AgentError, Result};

/// The buying side of a marketplace transaction
pub struct BuyerAgent {
    address: Address,
    chain: Arc<dyn ChainClient>,
    profile: ChainProfile,
    gas_strategy: ResolvedGasStrategy,
}

impl BuyerAgent {
    /// Provision the buyer's smart account and connect to a chain profile
    pub async fn init(
        provider: &dyn AccountProvider,
        config: &SmartAccountConfig,
        profile: ChainProfile,
    ) -> Result<Self> {
        let account = provision(provider, config).await?;
        info!(address = %account.address, strategy = %account.gas_strategy, "buyer wallet ready");
        Ok(Self {
            address: account.address,
            chain: account.chain,
            profile,
            gas_strategy: account.gas_strategy,
        })
    }

    /// Assemble a buyer directly from an existing chain connection
    pub fn with_chain(
        address: Address,
        chain: Arc<dyn ChainClient>,
        profile: ChainProfile,
        gas_strategy: ResolvedGasStrategy,
    ) -> Self {
        Self {
            address,
            chain,
            profile,
            gas_strategy,
        }
    }

    /// The buyer's wallet address
    pub fn address(&self) -> Address {
        self.address
    }

    /// The gas strategy resolved at provisioning
    pub fn gas_strategy(&self) -> ResolvedGasStrategy {
        self.gas_strategy
    }

    /// The settlement token this buyer funds in
    pub fn token(&self) -> &TokenInfo {
        &self.profile.token
    }

    /// Check the seller's reputation-derived job ceiling for a price
    ///
    /// Re-queries the ledger on every call - the ceiling moves with each
    /// settled job, so a cached value is stale by definition.
    pub async fn ensure_within_job_ceiling(&self, seller: Address, amount: Amount) -> Result<()> {
        let score = ScoreClient::new(self.chain.clone(), &self.profile);
        let ceiling = score.get_max_job_value(seller).await?;
        if amount > ceiling {
            return Err(AgentError::Agora(AgoraError::validation(
                "amount",
                format!("exceeds seller's max job value ({ceiling})"),
            )));
        }
        Ok(())
    }

    /// Approve `amount + 2% fee` and fund the escrow
    ///
    /// Returns the approval and funding transaction hashes.
    pub async fn fund_purchase(&self, request: &FundRequest) -> Result<(TxHash, TxHash)> {
        let escrow = self.escrow_client();
        let approval = amount_with_fee(request.amount).ok_or_else(|| {
            AgoraError::validation("amount", "overflows fee computation")
        })?;
        let approve_tx = escrow.approve_token(approval).await?;
        let fund_tx = escrow.fund(request).await?;
        Ok((approve_tx, fund_tx))
    }

    /// Accept delivery and release funds to the seller immediately
    pub async fn accept_delivery(&self, transaction_id: &str) -> Result<TxHash> {
        Ok(self.escrow_client().accept(transaction_id).await?)
    }

    /// Contest a delivery within the dispute window
    pub async fn dispute(&self, transaction_id: &str) -> Result<TxHash> {
        Ok(self.escrow_client().dispute(transaction_id).await?)
    }

    /// Reclaim funds from an escrow the seller abandoned
    pub async fn claim_abandoned(&self, transaction_id: &str) -> Result<TxHash> {
        Ok(self.escrow_client().claim_abandoned(transaction_id).await?)
    }

    /// Read the escrow record for a transaction
    pub async fn escrow(&self, transaction_id: &str) -> Result<Option<EscrowDetails>> {
        Ok(self.escrow_client().get_escrow(transaction_id).await?)
    }

    fn escrow_client(&self) -> EscrowClient {
        EscrowClient::new(self.chain.clone(), self.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_chain::{CallValue, ContractCall, BASE_SEPOLIA_CHAIN_ID};
    use agora_types::{Hash32, LedgerError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Chain whose reads answer getMaxJobValue and whose sends are recorded
    struct CeilingChain {
        ceiling: u128,
        sent: Mutex<Vec<ContractCall>>,
    }

    #[async_trait]
    impl ChainClient for CeilingChain {
        async fn send(
            &self,
            _to: Address,
            call: ContractCall,
        ) -> std::result::Result<TxHash, LedgerError> {
            self.sent.lock().unwrap().push(call);
            Ok(Hash32::new([0xcc; 32]))
        }

        async fn read(
            &self,
            _to: Address,
            _call: ContractCall,
        ) -> std::result::Result<Vec<CallValue>, LedgerError> {
            Ok(vec![CallValue::Uint(self.ceiling)])
        }
    }

    fn profile() -> ChainProfile {
        ChainProfile {
            chain_id: BASE_SEPOLIA_CHAIN_ID,
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

    fn buyer_over(chain: Arc<CeilingChain>) -> BuyerAgent {
        BuyerAgent::with_chain(
            Address::new([0x01; 20]),
            chain,
            profile(),
            ResolvedGasStrategy::Erc20,
        )
    }

    #[tokio::test]
    async fn test_ceiling_gate_rejects_oversized_jobs() {
        let chain = Arc::new(CeilingChain {
            ceiling: 10_000_000,
            sent: Mutex::new(Vec::new()),
        });
        let buyer = buyer_over(chain);

        let seller = Address::new([0x02; 20]);
        buyer
            .ensure_within_job_ceiling(seller, Amount::new(10_000_000))
            .await
            .unwrap();
        let err = buyer
            .ensure_within_job_ceiling(seller, Amount::new(10_000_001))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::Agora(AgoraError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_fund_purchase_approves_amount_plus_fee() {
        let chain = Arc::new(CeilingChain {
            ceiling: u128::MAX,
            sent: Mutex::new(Vec::new()),
        });
        let buyer = buyer_over(chain.clone());

        let deadline = chrono::Utc::now().timestamp() as u64 + 24 * 3_600;
        let request = FundRequest::new(
            "tx-fund",
            Address::new([0x02; 20]),
            Amount::new(5_000_000),
            deadline,
        );
        buyer.fund_purchase(&request).await.unwrap();

        let sent = chain.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].function, "approve");
        // 5_000_000 + 2% = 5_100_000
        assert_eq!(sent[0].args[1], CallValue::Uint(5_100_000));
        assert_eq!(sent[1].function, "createEscrow");
    }
}
