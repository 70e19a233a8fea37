//! Gas strategy types
//!
//! An agent account pays network fees either natively or through a
//! token-denominated fee sponsor. `Auto` defers the choice to a one-shot
//! balance check at account construction time.

use serde::{Deserialize, Serialize};

/// Requested gas strategy for an agent account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GasStrategy {
    /// Account pays fees in the chain's native asset
    SelfFunded,
    /// Fees sponsored via an ERC-20 paymaster
    Erc20,
    /// Decide from the native balance at construction time
    #[default]
    Auto,
}

/// A gas strategy after `Auto` has been resolved away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedGasStrategy {
    /// Account pays fees in the chain's native asset
    SelfFunded,
    /// Fees sponsored via an ERC-20 paymaster
    Erc20,
}

impl ResolvedGasStrategy {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfFunded => "self-funded",
            Self::Erc20 => "erc20",
        }
    }
}

impl std::fmt::Display for ResolvedGasStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
