//! Agora Escrow - the lifecycle state machine over the settlement ledger
//!
//! The ledger enforces every state transition; this crate's job is to
//! construct well-formed calls and interpret results:
//!
//! - `EscrowClient` drives fund / deliver / accept / finalize / dispute /
//!   claim-abandoned and mirrors the ledger's advisory read-only guards
//! - `ScoreClient` reads the reputation ledger (score, stats, job ceiling)
//! - `ResolverClient` submits binding dispute outcomes (resolver role only)
//!
//! # Key Principle
//!
//! Client-side checks are advisory. The authoritative guard runs on the
//! ledger at call time, and a race between check and call surfaces the
//! ledger's rejection as an error - it is never silently swallowed.

pub mod escrow;
pub mod fees;
pub mod reputation;
pub mod resolver;

pub use escrow::{
    EscrowClient, FundRequest, DEFAULT_ABANDONMENT_GRACE_SECS, DEFAULT_DISPUTE_WINDOW_SECS,
    MAX_ABANDONMENT_GRACE_SECS, MAX_DISPUTE_WINDOW_SECS, MIN_ABANDONMENT_GRACE_SECS,
    MIN_DISPUTE_WINDOW_SECS,
};
pub use fees::{amount_with_fee, platform_fee, PLATFORM_FEE_BPS};
pub use reputation::ScoreClient;
pub use resolver::ResolverClient;
