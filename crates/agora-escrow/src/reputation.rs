//! ScoreClient - read-only reputation oracle
//!
//! No mutation path exists here. Scores move only as a side effect of
//! escrow resolution calls recorded by the ledger, so a ceiling fetched
//! before one settlement may be stale after the next - re-query before
//! gating a purchase.

use std::sync::Arc;

use agora_chain::{CallValue, ChainClient, ChainProfile, ContractCall};
use agora_types::{Address, AgentStats, Amount, LedgerError, Result};

/// Read-only client for the reputation contract
pub struct ScoreClient {
    chain: Arc<dyn ChainClient>,
    address: Address,
}

impl ScoreClient {
    /// Create a client over a chain backend and profile
    pub fn new(chain: Arc<dyn ChainClient>, profile: &ChainProfile) -> Self {
        Self {
            chain,
            address: profile.score,
        }
    }

    /// An agent's trust score. Signed - may be negative.
    pub async fn get_score(&self, agent: Address) -> Result<i128> {
        let call = ContractCall::new("getScore").address(agent);
        let values = self.chain.read(self.address, call).await?;
        values
            .first()
            .and_then(CallValue::as_int)
            .ok_or_else(|| decode_err("getScore", "expected a single signed word").into())
    }

    /// Full reputation stats for an agent
    pub async fn get_agent_stats(&self, agent: Address) -> Result<AgentStats> {
        let call = ContractCall::new("getAgentStats").address(agent);
        let values = self.chain.read(self.address, call).await?;
        if values.len() != 5 {
            return Err(decode_err(
                "getAgentStats",
                &format!("expected 5 words, got {}", values.len()),
            )
            .into());
        }
        let int = |i: usize, name: &str| {
            values[i]
                .as_int()
                .ok_or_else(|| decode_err("getAgentStats", &format!("{name} is not signed")))
        };
        let uint = |i: usize, name: &str| {
            values[i]
                .as_uint()
                .ok_or_else(|| decode_err("getAgentStats", &format!("{name} is not unsigned")))
        };
        Ok(AgentStats {
            score: int(0, "score")?,
            total_jobs: uint(1, "jobs")? as u64,
            disputes_lost: uint(2, "disputesLost")? as u64,
            jobs_abandoned: uint(3, "abandoned")? as u64,
            max_job_value: Amount::new(uint(4, "maxJobValue")?),
        })
    }

    /// Maximum job value the agent may currently accept, derived from score
    pub async fn get_max_job_value(&self, agent: Address) -> Result<Amount> {
        let call = ContractCall::new("getMaxJobValue").address(agent);
        let values = self.chain.read(self.address, call).await?;
        values
            .first()
            .and_then(CallValue::as_uint)
            .map(Amount::new)
            .ok_or_else(|| decode_err("getMaxJobValue", "expected a single unsigned word").into())
    }
}

fn decode_err(function: &str, detail: &str) -> LedgerError {
    LedgerError::Decode {
        function: function.to_string(),
        detail: detail.to_string(),
    }
}
