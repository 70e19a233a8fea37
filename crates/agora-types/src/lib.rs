//! Agora Types - Canonical domain types for escrowed agent commerce
//!
//! This crate contains all foundational types for Agora with zero dependencies
//! on other agora crates. It defines the complete type system for:
//!
//! - Fixed-width chain primitives (Address, Hash32, Amount)
//! - Escrow records and lifecycle status codes
//! - Agent reputation stats
//! - Marketplace transaction records
//! - Webhook event envelopes
//! - Gas strategy selection
//! - The error taxonomy shared by every layer
//!
//! # Architectural Invariants
//!
//! These types support the core Agora safety invariants:
//!
//! 1. Funds move only through the escrow lifecycle - never directly
//! 2. Escrow transitions are monotonic - terminal states are final
//! 3. Failure is explicit - every fallible surface returns `AgoraError`

pub mod primitives;
pub mod escrow;
pub mod reputation;
pub mod transaction;
pub mod webhook;
pub mod gas;
pub mod error;

pub use primitives::*;
pub use escrow::*;
pub use reputation::*;
pub use transaction::*;
pub use webhook::*;
pub use gas::*;
pub use error::*;

/// Version of the Agora types schema
pub const TYPES_VERSION: &str = "0.1.0";
