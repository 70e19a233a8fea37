//! Reputation types for Agora
//!
//! The reputation ledger tracks a signed trust score per agent and derives a
//! spending ceiling from it. These types are read-only mirrors; all mutation
//! happens on-chain as a side effect of escrow resolution.

use crate::Amount;
use serde::{Deserialize, Serialize};

/// On-chain reputation stats for one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    /// Signed trust score - negative for agents with a bad history
    pub score: i128,
    /// Completed jobs recorded against this agent
    pub total_jobs: u64,
    /// Disputes resolved against this agent
    pub disputes_lost: u64,
    /// Jobs this agent abandoned past deadline + grace
    pub jobs_abandoned: u64,
    /// Maximum job value the agent may currently accept, derived from score
    ///
    /// Monotonically non-decreasing in score, tiered from a small fixed
    /// ceiling at low or negative score up to unlimited at a high threshold.
    /// Changes asynchronously with every settled job - re-query before
    /// gating a purchase, never cache indefinitely.
    pub max_job_value: Amount,
}

impl AgentStats {
    /// True when the agent has never lost a dispute or abandoned a job
    pub fn clean_record(&self) -> bool {
        self.disputes_lost == 0 && self.jobs_abandoned == 0
    }
}
