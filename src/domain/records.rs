use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Policy status as reported on a carrier payment row.
///
/// Ordered so that `Cancelled` sorts after `Active`; the deduplicator relies
/// on this when retransmitted rows disagree only in status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Cancelled,
}

impl PolicyStatus {
    /// Parse a raw CSV cell: trimmed, case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("active") {
            Some(PolicyStatus::Active)
        } else if raw.eq_ignore_ascii_case("cancelled") {
            Some(PolicyStatus::Cancelled)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyStatus::Active => write!(f, "active"),
            PolicyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Composite (policy, agent) key for the earned and status maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyKey {
    pub policy_id: String,
    pub agent_id: String,
}

impl PolicyKey {
    pub fn new(policy_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            agent_id: agent_id.into(),
        }
    }
}

/// One row of the carrier payment-remittance ledger.
///
/// A negative `amount` is a claw-back. Many records may share a policy id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub policy_id: String,
    pub agent_id: String,
    /// Informational only; never used by the engine.
    pub carrier: String,
    pub paid_date: NaiveDate,
    pub amount: Decimal,
    pub status: PolicyStatus,
}

impl PaymentRecord {
    pub fn key(&self) -> PolicyKey {
        PolicyKey::new(self.policy_id.clone(), self.agent_id.clone())
    }
}

/// One row of the CRM policy-roster extract. Exactly one entry per policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRosterEntry {
    pub policy_id: String,
    pub agent_id: String,
    pub submit_date: NaiveDate,
    pub ltv_expected: Decimal,
}

impl PolicyRosterEntry {
    pub fn key(&self) -> PolicyKey {
        PolicyKey::new(self.policy_id.clone(), self.agent_id.clone())
    }
}
