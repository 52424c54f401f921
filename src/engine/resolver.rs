use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::{PaymentRecord, PolicyKey, PolicyStatus};

/// Net earned amount per (policy, agent) over the deduplicated ledger.
///
/// Claw-backs subtract; a negative total is preserved here and only floored
/// later when `remaining_expected` is computed.
pub fn earned_by_policy(deduplicated: &[PaymentRecord]) -> HashMap<PolicyKey, Decimal> {
    let mut earned: HashMap<PolicyKey, Decimal> = HashMap::new();
    for record in deduplicated {
        *earned.entry(record.key()).or_insert(Decimal::ZERO) += record.amount;
    }
    earned
}

/// Status of the chronologically last payment per (policy, agent).
///
/// Carriers may retroactively report a cancellation; the policy's current
/// state is whatever the most recent payment event says. Among records
/// sharing the latest paid date, the one appearing last in input order wins;
/// dedup output order is stable, so the result is deterministic.
pub fn latest_status_by_policy(
    deduplicated: &[PaymentRecord],
) -> HashMap<PolicyKey, PolicyStatus> {
    let mut latest: HashMap<PolicyKey, (NaiveDate, PolicyStatus)> = HashMap::new();
    for record in deduplicated {
        let entry = latest
            .entry(record.key())
            .or_insert((record.paid_date, record.status));
        if record.paid_date >= entry.0 {
            *entry = (record.paid_date, record.status);
        }
    }

    latest
        .into_iter()
        .map(|(key, (_, status))| (key, status))
        .collect()
}
