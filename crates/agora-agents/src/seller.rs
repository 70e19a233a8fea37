//! Seller Agent - discovers purchases, delivers, gets paid
//!
//! The seller flow:
//! 1. Polls the discovery feed for purchases assigned to it
//! 2. Performs the work described by the request payload
//! 3. Submits the delivery proof on-chain (and optionally the response
//!    payload through the feed)
//! 4. Is paid when the buyer accepts or the dispute window lapses

use std::sync::Arc;

use agora_chain::{ChainClient, ChainProfile};
use agora_escrow::{EscrowClient, ScoreClient};
use agora_types::{Address, AgentStats, Hash32, ResolvedGasStrategy, Transaction, TxHash};
use agora_wallet::{provision, AccountProvider, SmartAccountConfig};
use tokio::sync::mpsc;
use tracing::info;

use crate::feed::PurchaseFeed;
use crate::poller::{PollConfig, PollHandle, PurchasePoller};
use crate::{AgentError, Result};

/// On-chain context established by `init_wallet`
struct WalletContext {
    address: Address,
    chain: Arc<dyn ChainClient>,
    profile: ChainProfile,
    gas_strategy: ResolvedGasStrategy,
}

/// The selling side of a marketplace transaction
pub struct SellerAgent<F: PurchaseFeed + 'static> {
    feed: Arc<F>,
    wallet: Option<WalletContext>,
}

impl<F: PurchaseFeed + 'static> SellerAgent<F> {
    /// Create a seller over a discovery feed
    pub fn new(feed: Arc<F>) -> Self {
        Self { feed, wallet: None }
    }

    /// Provision the smart account used for on-chain operations
    ///
    /// Works with either owner-key or session-key credentials; the gas
    /// strategy is resolved once, here.
    pub async fn init_wallet(
        &mut self,
        provider: &dyn AccountProvider,
        config: &SmartAccountConfig,
        profile: ChainProfile,
    ) -> Result<Address> {
        let account = provision(provider, config).await?;
        info!(address = %account.address, strategy = %account.gas_strategy, "seller wallet ready");
        let address = account.address;
        self.wallet = Some(WalletContext {
            address,
            chain: account.chain,
            profile,
            gas_strategy: account.gas_strategy,
        });
        Ok(address)
    }

    /// Start polling for purchases assigned to this seller
    ///
    /// Returns the receiving end of the sink and a handle whose `stop` is
    /// cooperative: it takes effect at the next cycle boundary.
    pub fn poll_purchases(&self, config: PollConfig) -> (mpsc::Receiver<Transaction>, PollHandle) {
        let (sink, receiver) = mpsc::channel(32);
        let handle = PurchasePoller::new(self.feed.clone(), config).spawn(sink);
        (receiver, handle)
    }

    /// Record a delivery payload through the feed only (no chain call)
    pub async fn deliver(
        &self,
        transaction_id: &str,
        response_payload: serde_json::Value,
    ) -> Result<Transaction> {
        Ok(self.feed.deliver(transaction_id, response_payload).await?)
    }

    /// Submit the delivery proof on-chain, optionally also recording the
    /// response payload through the feed
    pub async fn submit_delivery(
        &self,
        transaction_id: &str,
        proof_hash: Hash32,
        response_payload: Option<serde_json::Value>,
    ) -> Result<TxHash> {
        let escrow = self.escrow_client()?;
        let tx_hash = escrow.submit_delivery(transaction_id, proof_hash).await?;

        if let Some(payload) = response_payload {
            self.feed.deliver(transaction_id, payload).await?;
        }

        Ok(tx_hash)
    }

    /// Read reputation stats - own by default, or any agent's
    ///
    /// Read-only on the ledger side, but needs the wallet's chain
    /// connection to issue the view call.
    pub async fn agent_stats(&self, agent: Option<Address>) -> Result<AgentStats> {
        let wallet = self.wallet.as_ref().ok_or(AgentError::WalletNotInitialized)?;
        let agent = agent.unwrap_or(wallet.address);
        let score = ScoreClient::new(wallet.chain.clone(), &wallet.profile);
        Ok(score.get_agent_stats(agent).await?)
    }

    /// The provisioned wallet address, if any
    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet.as_ref().map(|w| w.address)
    }

    /// The gas strategy resolved at wallet provisioning, if any
    pub fn gas_strategy(&self) -> Option<ResolvedGasStrategy> {
        self.wallet.as_ref().map(|w| w.gas_strategy)
    }

    fn escrow_client(&self) -> Result<EscrowClient> {
        let wallet = self.wallet.as_ref().ok_or(AgentError::WalletNotInitialized)?;
        Ok(EscrowClient::new(wallet.chain.clone(), wallet.profile.clone()))
    }
}
