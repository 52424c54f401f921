use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::AgentQuote;

/// Response envelope for POST /v1/advance-quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceQuoteResponse {
    pub generated_at: DateTime<Utc>,
    pub quotes: Vec<AgentQuote>,
    pub total_agents: usize,
    pub total_policies_analyzed: usize,
}

/// Response for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub version: String,
    pub status: String,
    pub uptime_secs: i64,
}
