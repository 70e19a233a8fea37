//! Per-chain contract profiles
//!
//! A profile names the deployed contract addresses and the default
//! settlement token for one chain. Profiles are configuration, not code -
//! deployments change without a release - so they load from the environment
//! or are built explicitly; only the chain ids are constants.

use agora_types::{Address, AgoraError, Result};
use serde::{Deserialize, Serialize};

/// Base Sepolia (testnet)
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// Base mainnet
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;

/// A settlement token deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Token contract address
    pub address: Address,
    /// Decimal places (USDC uses 6)
    pub decimals: u8,
    /// Display symbol
    pub symbol: String,
}

impl TokenInfo {
    /// Convert a marketplace-unit price (e.g. 5.0 USDC) into smallest units
    pub fn to_units(&self, amount: f64) -> u128 {
        (amount * 10f64.powi(self.decimals as i32)).round() as u128
    }
}

/// Contract addresses and settlement token for one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProfile {
    /// Chain id this profile targets
    pub chain_id: u64,
    /// Escrow contract
    pub escrow: Address,
    /// Reputation contract
    pub score: Address,
    /// Dispute resolver contract
    pub resolver: Address,
    /// Default settlement token
    pub token: TokenInfo,
}

impl ChainProfile {
    /// Load a profile from the environment
    ///
    /// Reads `AGORA_CHAIN_ID`, `AGORA_ESCROW_ADDRESS`, `AGORA_SCORE_ADDRESS`,
    /// `AGORA_RESOLVER_ADDRESS`, `AGORA_TOKEN_ADDRESS`, and optionally
    /// `AGORA_TOKEN_DECIMALS` (default 6) and `AGORA_TOKEN_SYMBOL`
    /// (default USDC).
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| -> Result<String> {
            std::env::var(name).map_err(|_| AgoraError::validation(name, "not set"))
        };
        let addr = |name: &str| -> Result<Address> {
            var(name)?
                .parse()
                .map_err(|e| AgoraError::validation(name, format!("{e}")))
        };

        let chain_id = var("AGORA_CHAIN_ID")?
            .parse::<u64>()
            .map_err(|_| AgoraError::validation("AGORA_CHAIN_ID", "not an integer"))?;
        let decimals = std::env::var("AGORA_TOKEN_DECIMALS")
            .ok()
            .map(|v| {
                v.parse::<u8>()
                    .map_err(|_| AgoraError::validation("AGORA_TOKEN_DECIMALS", "not an integer"))
            })
            .transpose()?
            .unwrap_or(6);
        let symbol = std::env::var("AGORA_TOKEN_SYMBOL").unwrap_or_else(|_| "USDC".to_string());

        Ok(Self {
            chain_id,
            escrow: addr("AGORA_ESCROW_ADDRESS")?,
            score: addr("AGORA_SCORE_ADDRESS")?,
            resolver: addr("AGORA_RESOLVER_ADDRESS")?,
            token: TokenInfo {
                address: addr("AGORA_TOKEN_ADDRESS")?,
                decimals,
                symbol,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_units() {
        let usdc = TokenInfo {
            address: Address::new([9; 20]),
            decimals: 6,
            symbol: "USDC".to_string(),
        };
        assert_eq!(usdc.to_units(5.0), 5_000_000);
        assert_eq!(usdc.to_units(0.000001), 1);
    }

    #[test]
    fn test_profile_serde_round_trip() {
        let profile = ChainProfile {
            chain_id: BASE_SEPOLIA_CHAIN_ID,
            escrow: Address::new([1; 20]),
            score: Address::new([2; 20]),
            resolver: Address::new([3; 20]),
            token: TokenInfo {
                address: Address::new([4; 20]),
                decimals: 6,
                symbol: "USDC".to_string(),
            },
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: ChainProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
