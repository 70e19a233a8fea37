//! The ChainClient capability and the typed call representation
//!
//! A contract call is a function name plus typed arguments. Backends encode
//! it however their transport needs (ABI bytes, JSON-RPC params); the core
//! never sees the encoding, only the typed surface.

use agora_types::{Address, Hash32, LedgerError, TxHash};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One typed argument or return value of a contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallValue {
    /// A 20-byte address
    Address(Address),
    /// An unsigned word
    Uint(u128),
    /// A signed word
    Int(i128),
    /// A 32-byte word
    Hash(Hash32),
    /// A UTF-8 string
    Str(String),
    /// A boolean
    Bool(bool),
}

impl CallValue {
    /// Decode as an address
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Decode as an unsigned word
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Decode as a signed word
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v),
            // Ledgers return small unsigned words where a signed slot is
            // expected; accept the widening.
            Self::Uint(v) => i128::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Decode as a 32-byte word
    pub fn as_hash(&self) -> Option<Hash32> {
        match self {
            Self::Hash(h) => Some(*h),
            _ => None,
        }
    }

    /// Decode as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A contract call: function name plus typed arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCall {
    /// Contract function name
    pub function: String,
    /// Positional arguments
    pub args: Vec<CallValue>,
}

impl ContractCall {
    /// Start a call to the named function
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn arg(mut self, value: CallValue) -> Self {
        self.args.push(value);
        self
    }

    /// Append an address argument
    pub fn address(self, value: Address) -> Self {
        self.arg(CallValue::Address(value))
    }

    /// Append an unsigned argument
    pub fn uint(self, value: u128) -> Self {
        self.arg(CallValue::Uint(value))
    }

    /// Append a 32-byte word argument
    pub fn hash(self, value: Hash32) -> Self {
        self.arg(CallValue::Hash(value))
    }

    /// Append a string argument
    pub fn str(self, value: impl Into<String>) -> Self {
        self.arg(CallValue::Str(value.into()))
    }
}

/// The two primitives the core needs from a chain backend
///
/// State transitions are enforced by the ledger itself - `send` submits a
/// well-formed call and surfaces the ledger's verdict, nothing more. No
/// implementation may retry on failure; retry policy belongs to callers.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Submit a state-mutating call, returning the transaction hash
    async fn send(&self, to: Address, call: ContractCall) -> Result<TxHash, LedgerError>;

    /// Execute a view call, returning the decoded result words
    async fn read(&self, to: Address, call: ContractCall) -> Result<Vec<CallValue>, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_builder() {
        let call = ContractCall::new("createEscrow")
            .hash(Hash32::new([1; 32]))
            .address(Address::new([2; 20]))
            .uint(500);
        assert_eq!(call.function, "createEscrow");
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.args[2].as_uint(), Some(500));
    }

    #[test]
    fn test_value_decoding() {
        assert_eq!(CallValue::Uint(7).as_uint(), Some(7));
        assert_eq!(CallValue::Uint(7).as_int(), Some(7));
        assert_eq!(CallValue::Int(-3).as_int(), Some(-3));
        assert_eq!(CallValue::Bool(true).as_bool(), Some(true));
        assert_eq!(CallValue::Uint(7).as_address(), None);
        assert_eq!(CallValue::Uint(u128::MAX).as_int(), None);
    }
}
