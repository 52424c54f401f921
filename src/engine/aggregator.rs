use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::{AgentQuote, PolicyAnalysis};
use crate::error::{EngineError, Result};

/// Running totals for one agent, created on first sight and updated by
/// merging one policy analysis at a time.
#[derive(Debug, Default)]
struct AgentAccumulator {
    earned_to_date: Decimal,
    total_eligible_remaining: Decimal,
    eligible_policies_count: u32,
}

impl AgentAccumulator {
    fn merge(&mut self, analysis: &PolicyAnalysis) {
        // Earned counts every policy; remaining and count only eligible ones.
        self.earned_to_date += analysis.earned_to_date;
        if analysis.is_eligible {
            self.total_eligible_remaining += analysis.remaining_expected;
            self.eligible_policies_count += 1;
        }
    }
}

/// One capped quote per distinct agent in the analyses, sorted ascending by
/// agent id.
///
/// `safe_to_advance = min(total_eligible_remaining * advance_rate,
/// advance_cap)`, so it always lands in `[0, advance_cap]` given a
/// non-negative rate and cap.
pub fn calculate_agent_quotes(
    analyses: &[PolicyAnalysis],
    advance_rate: Decimal,
    advance_cap: Decimal,
) -> Result<Vec<AgentQuote>> {
    let mut accumulators: BTreeMap<String, AgentAccumulator> = BTreeMap::new();
    for analysis in analyses {
        accumulators
            .entry(analysis.agent_id.clone())
            .or_default()
            .merge(analysis);
    }

    let mut quotes = Vec::with_capacity(accumulators.len());
    for (agent_id, acc) in accumulators {
        let calculated = acc
            .total_eligible_remaining
            .checked_mul(advance_rate)
            .ok_or_else(|| {
                EngineError::Computation(format!(
                    "advance overflow for agent {agent_id}: {} * {advance_rate}",
                    acc.total_eligible_remaining
                ))
            })?;
        quotes.push(AgentQuote {
            agent_id,
            earned_to_date: acc.earned_to_date,
            total_eligible_remaining: acc.total_eligible_remaining,
            safe_to_advance: calculated.min(advance_cap),
            eligible_policies_count: acc.eligible_policies_count,
        });
    }

    Ok(quotes)
}
