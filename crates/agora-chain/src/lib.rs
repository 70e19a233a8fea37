//! Agora Chain - the capability seam between the core and the ledger
//!
//! Everything the core needs from a chain backend is two primitives:
//! `send` a state-mutating contract call and `read` a view call. The
//! `ChainClient` trait captures exactly that, so the escrow state machine is
//! testable against an in-memory fake and portable across backends.
//!
//! This crate also owns the deterministic id derivation (platform
//! transaction id -> on-chain escrow id) and the per-chain contract
//! profiles, since every caller must derive and address identically.

pub mod client;
pub mod id;
pub mod profile;

pub use client::{CallValue, ChainClient, ContractCall};
pub use id::{criteria_hash, escrow_id};
pub use profile::{ChainProfile, TokenInfo, BASE_MAINNET_CHAIN_ID, BASE_SEPOLIA_CHAIN_ID};
