//! Fixed-width chain primitives
//!
//! Addresses and 32-byte words are the two shapes the settlement ledger
//! speaks. Both render as 0x-prefixed lowercase hex and parse back from it,
//! so they can cross JSON boundaries without a side schema.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a fixed-width hex value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Missing the `0x` prefix
    #[error("expected a 0x-prefixed hex string")]
    MissingPrefix,
    /// Wrong number of hex characters
    #[error("expected {expected} hex characters, got {actual}")]
    BadLength { expected: usize, actual: usize },
    /// Non-hex characters in the payload
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Macro to generate fixed-width byte types with common implementations
macro_rules! define_hex_type {
    ($name:ident, $len:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Canonical zero value (all bytes zero)
            pub const ZERO: Self = Self([0u8; $len]);

            /// Width in bytes
            pub const LEN: usize = $len;

            /// Wrap raw bytes
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Borrow the raw bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// True when every byte is zero
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Render as 0x-prefixed lowercase hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = HexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let stripped = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .ok_or(HexError::MissingPrefix)?;
                if stripped.len() != $len * 2 {
                    return Err(HexError::BadLength {
                        expected: $len * 2,
                        actual: stripped.len(),
                    });
                }
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(stripped, &mut bytes)
                    .map_err(|e| HexError::InvalidHex(e.to_string()))?;
                Ok(Self(bytes))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

define_hex_type!(Address, 20, "A 20-byte account address on the settlement ledger");
define_hex_type!(Hash32, 32, "A 32-byte word - hashes, escrow ids, transaction hashes");

/// Deterministic on-chain escrow identifier (keccak256 of a transaction id)
pub type EscrowId = Hash32;

/// Hash of a submitted ledger transaction
pub type TxHash = Hash32;

/// An amount in the smallest units of a settlement token
///
/// Token amounts use integer smallest-unit arithmetic (e.g. 6-decimal USDC),
/// never floats. Arithmetic is checked; overflow is an error, not a wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(pub u128);

impl Amount {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Wrap a raw smallest-unit value
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Raw smallest-unit value
    pub const fn units(&self) -> u128 {
        self.0
    }

    /// True for the zero amount
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(units: u128) -> Self {
        Self(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trip() {
        let addr: Address = "0x00112233445566778899aabbccddeeff00112233".parse().unwrap();
        assert_eq!(addr.to_string(), "0x00112233445566778899aabbccddeeff00112233");
        assert!(!addr.is_zero());
    }

    #[test]
    fn test_zero_sentinels_are_canonical_width() {
        assert_eq!(Address::ZERO.to_hex().len(), 2 + 40);
        assert_eq!(Hash32::ZERO.to_hex().len(), 2 + 64);
        assert!(Address::ZERO.is_zero());
        assert!(Hash32::ZERO.is_zero());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "112233445566778899aabbccddeeff0011223344".parse::<Address>(),
            Err(HexError::MissingPrefix)
        );
        assert!(matches!(
            "0x1122".parse::<Address>(),
            Err(HexError::BadLength { expected: 40, actual: 4 })
        ));
        assert!(matches!(
            "0xzz112233445566778899aabbccddeeff00112233".parse::<Address>(),
            Err(HexError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_hash_serde_as_hex_string() {
        let hash = Hash32::new([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(32)));
        let back: Hash32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_amount_checked_math() {
        let a = Amount::new(u128::MAX);
        assert!(a.checked_add(Amount::new(1)).is_none());
        assert_eq!(
            Amount::new(5).checked_sub(Amount::new(2)),
            Some(Amount::new(3))
        );
        assert!(Amount::new(2).checked_sub(Amount::new(5)).is_none());
    }
}
