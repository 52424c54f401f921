use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PolicyStatus;

/// Reconciliation result for a single roster policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAnalysis {
    pub policy_id: String,
    pub agent_id: String,
    /// Net sum of deduplicated payments; negative when claw-backs exceed
    /// payments. Zero for policies with no payment history.
    pub earned_to_date: Decimal,
    /// max(ltv_expected - earned_to_date, 0).
    pub remaining_expected: Decimal,
    pub is_eligible: bool,
    pub submit_date: NaiveDate,
    pub latest_status: PolicyStatus,
}

/// Commission advance quote for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentQuote {
    pub agent_id: String,
    /// Earned across all of the agent's policies, eligible or not.
    pub earned_to_date: Decimal,
    /// Sum of remaining_expected over eligible policies only.
    pub total_eligible_remaining: Decimal,
    /// min(total_eligible_remaining * advance_rate, advance_cap).
    pub safe_to_advance: Decimal,
    pub eligible_policies_count: u32,
}
