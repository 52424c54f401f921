use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::{AgentQuote, PaymentRecord, PolicyAnalysis, PolicyRosterEntry, PolicyStatus};
use crate::engine::{
    calculate_agent_quotes, deduplicate_payments, earned_by_policy, is_eligible,
    latest_status_by_policy,
};
use crate::error::{EngineError, Result, TableKind};

/// Join the roster against the ledger-derived maps, producing exactly one
/// analysis per roster entry.
///
/// Fails the whole batch if the roster contains duplicate policy ids; the
/// reported row number is 1-based counting the CSV header, matching the
/// ingest convention.
pub fn analyze_policies(
    payments: &[PaymentRecord],
    roster: &[PolicyRosterEntry],
    config: &EngineConfig,
) -> Result<Vec<PolicyAnalysis>> {
    let today = config.reference_today();

    let deduplicated = deduplicate_payments(payments);
    if deduplicated.len() < payments.len() {
        info!(
            removed = payments.len() - deduplicated.len(),
            "collapsed duplicate payment rows"
        );
    }

    let earned = earned_by_policy(&deduplicated);
    let statuses = latest_status_by_policy(&deduplicated);
    debug!(policies = earned.len(), "resolved ledger state");

    let mut seen_policies: HashSet<&str> = HashSet::with_capacity(roster.len());
    for (idx, entry) in roster.iter().enumerate() {
        if !seen_policies.insert(entry.policy_id.as_str()) {
            return Err(EngineError::Value {
                table: TableKind::CrmPolicies,
                row: idx + 2,
                field: "policy_id",
                message: format!("duplicate policy_id: {}", entry.policy_id),
            });
        }
    }

    let mut analyses = Vec::with_capacity(roster.len());
    for entry in roster {
        let key = entry.key();
        // Explicit defaults for policies with no payment history: nothing
        // earned yet, status taken as active.
        let earned_to_date = earned.get(&key).copied().unwrap_or(Decimal::ZERO);
        let latest_status = statuses.get(&key).copied().unwrap_or(PolicyStatus::Active);

        let remaining_expected = (entry.ltv_expected - earned_to_date).max(Decimal::ZERO);
        let eligible = is_eligible(
            entry.submit_date,
            latest_status,
            today,
            config.eligibility_days,
        );

        analyses.push(PolicyAnalysis {
            policy_id: entry.policy_id.clone(),
            agent_id: entry.agent_id.clone(),
            earned_to_date,
            remaining_expected,
            is_eligible: eligible,
            submit_date: entry.submit_date,
            latest_status,
        });
    }

    Ok(analyses)
}

/// Full quote pipeline: dedup, resolve, join, evaluate, aggregate.
///
/// All-or-nothing; no partial results are emitted on failure.
pub fn compute_quotes(
    payments: &[PaymentRecord],
    roster: &[PolicyRosterEntry],
    config: &EngineConfig,
) -> Result<Vec<AgentQuote>> {
    let analyses = analyze_policies(payments, roster, config)?;
    let quotes = calculate_agent_quotes(&analyses, config.advance_rate, config.advance_cap)?;
    info!(
        agents = quotes.len(),
        policies = analyses.len(),
        "computed advance quotes"
    );
    Ok(quotes)
}
