use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::PaymentRecord;

/// Rows matching on all three fields are the same logical payment; carrier
/// feeds retransmit them. Agent and carrier are deliberately not part of
/// the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    policy_id: String,
    paid_date: NaiveDate,
    amount: Decimal,
}

impl DedupKey {
    fn of(record: &PaymentRecord) -> Self {
        Self {
            policy_id: record.policy_id.clone(),
            paid_date: record.paid_date,
            amount: record.amount.normalize(),
        }
    }
}

/// Collapse retransmitted payment rows to at most one record per
/// (policy id, paid date, amount) triple.
///
/// When duplicates disagree only in status, the status that orders last
/// wins (cancelled over active) — a documented policy choice, not an
/// inference about which row is correct. Output preserves the relative
/// order of first occurrences, so repeated application is a no-op.
pub fn deduplicate_payments(payments: &[PaymentRecord]) -> Vec<PaymentRecord> {
    let mut kept: Vec<PaymentRecord> = Vec::with_capacity(payments.len());
    let mut index_by_key: HashMap<DedupKey, usize> = HashMap::with_capacity(payments.len());

    for record in payments {
        match index_by_key.get(&DedupKey::of(record)) {
            Some(&idx) => {
                if record.status > kept[idx].status {
                    kept[idx] = record.clone();
                }
            }
            None => {
                index_by_key.insert(DedupKey::of(record), kept.len());
                kept.push(record.clone());
            }
        }
    }

    kept
}
