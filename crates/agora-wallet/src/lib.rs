//! Agora Wallet - agent account provisioning and gas strategy
//!
//! Agents send ledger transactions through a smart account that pays
//! network fees either natively (`self-funded`) or via a token-denominated
//! paymaster (`erc20`). The strategy decision is a pure function of a single
//! balance read; the account-construction mechanics live behind the
//! `AccountProvider` seam so backends stay swappable and tests stay local.

pub mod account;
pub mod gas;

pub use account::{
    provision, AccountProvider, Credentials, ProvisionedAccount, SmartAccountConfig,
};
pub use gas::{resolve_gas_strategy, MIN_GAS_BALANCE};
