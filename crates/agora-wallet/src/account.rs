//! Smart account provisioning
//!
//! A provider backend derives the account address, reads the native balance,
//! and connects a `ChainClient` bound to that account. Providers are
//! injected at construction time - no deferred module loading - so the
//! provisioning flow is one explicit async function.

use std::sync::Arc;

use agora_chain::ChainClient;
use agora_types::{Address, Amount, GasStrategy, ResolvedGasStrategy, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gas::{resolve_gas_strategy, MIN_GAS_BALANCE};

/// Key material an account is controlled by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// Hex-encoded owner private key
    PrivateKey(String),
    /// Serialized session key - agent operation without the owner key
    SessionKey(String),
}

/// Configuration for provisioning a smart account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartAccountConfig {
    /// Named chain, e.g. `baseSepolia`
    pub chain: String,
    /// Bundler project id
    pub project_id: String,
    /// Owner key or session key
    pub credentials: Credentials,
    /// Requested gas strategy
    #[serde(default)]
    pub gas_strategy: GasStrategy,
}

/// A ready-to-use account: its address, its chain connection, and the
/// strategy it was provisioned with
pub struct ProvisionedAccount {
    /// Smart account address
    pub address: Address,
    /// Chain connection bound to this account
    pub chain: Arc<dyn ChainClient>,
    /// Strategy resolved at provisioning time
    pub gas_strategy: ResolvedGasStrategy,
}

/// Backend that constructs smart accounts
///
/// Implementations wrap whatever account machinery the deployment uses;
/// the core only needs these three operations.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Derive the account address for a config without connecting
    async fn derive_address(&self, config: &SmartAccountConfig) -> Result<Address>;

    /// Native balance of an address, in wei
    async fn native_balance(&self, address: Address) -> Result<Amount>;

    /// Connect an account client using an already-resolved strategy
    async fn connect(
        &self,
        config: &SmartAccountConfig,
        strategy: ResolvedGasStrategy,
    ) -> Result<Arc<dyn ChainClient>>;
}

/// Provision a smart account
///
/// For `auto`, the native balance is read exactly once, before the
/// decision; explicit strategies skip the read entirely. The decision is
/// final for the lifetime of the account client.
pub async fn provision(
    provider: &dyn AccountProvider,
    config: &SmartAccountConfig,
) -> Result<ProvisionedAccount> {
    let address = provider.derive_address(config).await?;

    let gas_strategy = match config.gas_strategy {
        GasStrategy::Auto => {
            let balance = provider.native_balance(address).await?;
            resolve_gas_strategy(GasStrategy::Auto, balance.units(), MIN_GAS_BALANCE)
        }
        requested => resolve_gas_strategy(requested, 0, MIN_GAS_BALANCE),
    };

    info!(%address, strategy = %gas_strategy, "provisioning smart account");
    let chain = provider.connect(config, gas_strategy).await?;

    Ok(ProvisionedAccount {
        address,
        chain,
        gas_strategy,
    })
}
