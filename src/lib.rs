pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ingest;

pub use config::{AppConfig, EngineConfig};
pub use domain::{
    AgentQuote, PaymentRecord, PolicyAnalysis, PolicyKey, PolicyRosterEntry, PolicyStatus,
};
pub use engine::{analyze_policies, compute_quotes, deduplicate_payments};
pub use error::{EngineError, Result};
