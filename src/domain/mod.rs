pub mod analysis;
pub mod records;

pub use analysis::{AgentQuote, PolicyAnalysis};
pub use records::{PaymentRecord, PolicyKey, PolicyRosterEntry, PolicyStatus};
