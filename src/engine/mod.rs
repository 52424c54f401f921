pub mod aggregator;
pub mod dedup;
pub mod eligibility;
pub mod pipeline;
pub mod resolver;

pub use aggregator::calculate_agent_quotes;
pub use dedup::deduplicate_payments;
pub use eligibility::is_eligible;
pub use pipeline::{analyze_policies, compute_quotes};
pub use resolver::{earned_by_policy, latest_status_by_policy};
