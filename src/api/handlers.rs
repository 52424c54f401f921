use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::api::{
    state::AppState,
    types::{AdvanceQuoteResponse, HealthResponse},
};
use crate::engine;
use crate::error::EngineError;
use crate::ingest;

const CARRIER_PART: &str = "carrier_remittance";
const CRM_PART: &str = "crm_policies";

/// POST /v1/advance-quote
///
/// Multipart form with two CSV file parts, `carrier_remittance` and
/// `crm_policies`. Schema and value problems come back as 400 with a body
/// naming the table, row, and field; internal failures as 500.
pub async fn advance_quote(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> std::result::Result<Json<AdvanceQuoteResponse>, (StatusCode, String)> {
    let mut carrier_csv: Option<Vec<u8>> = None;
    let mut crm_csv: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("malformed multipart body: {e}")))?
    {
        let part = field.name().unwrap_or("").to_string();
        if part != CARRIER_PART && part != CRM_PART {
            // Unknown parts are ignored, not rejected
            continue;
        }

        let file_name = field.file_name().unwrap_or("").trim().to_string();
        if file_name.is_empty() || !file_name.to_ascii_lowercase().ends_with(".csv") {
            warn!(part = %part, file = %file_name, "rejected upload without .csv extension");
            return Err((
                StatusCode::BAD_REQUEST,
                "both uploads must be CSV files with a .csv extension".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("failed to read {part}: {e}")))?;
        if part == CARRIER_PART {
            carrier_csv = Some(bytes.to_vec());
        } else {
            crm_csv = Some(bytes.to_vec());
        }
    }

    let carrier_csv = carrier_csv.ok_or_else(|| missing_part(CARRIER_PART))?;
    let crm_csv = crm_csv.ok_or_else(|| missing_part(CRM_PART))?;

    let payments = ingest::read_payments(carrier_csv.as_slice()).map_err(reject)?;
    let roster = ingest::read_roster(crm_csv.as_slice()).map_err(reject)?;
    info!(
        payments = payments.len(),
        roster = roster.len(),
        "processing advance quote request"
    );

    let quotes = engine::compute_quotes(&payments, &roster, &state.config.engine).map_err(reject)?;

    Ok(Json(AdvanceQuoteResponse {
        generated_at: Utc::now(),
        total_agents: quotes.len(),
        total_policies_analyzed: roster.len(),
        quotes,
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
        uptime_secs: (Utc::now() - state.start_time).num_seconds(),
    })
}

fn missing_part(part: &str) -> (StatusCode, String) {
    (
        StatusCode::BAD_REQUEST,
        format!("missing multipart file field: {part}"),
    )
}

fn reject(err: EngineError) -> (StatusCode, String) {
    if err.is_client_fault() {
        warn!(%err, "rejected invalid input");
        (StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!(%err, "quote computation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    }
}
