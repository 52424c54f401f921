//! CSV ingest for the two input tables.
//!
//! Enforces the schema and per-row value rules before the engine runs:
//! required columns must exist, identifiers are trimmed and non-empty, dates
//! are ISO `YYYY-MM-DD`, amounts are decimals, statuses are
//! active/cancelled (case-insensitive). Any bad row fails the whole batch.
//! Reported row numbers are 1-based counting the header row.

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

use crate::domain::{PaymentRecord, PolicyRosterEntry, PolicyStatus};
use crate::error::{EngineError, Result, TableKind};

const LEDGER_COLUMNS: &[&str] = &[
    "policy_id",
    "agent_id",
    "carrier",
    "paid_date",
    "amount",
    "status",
];

const ROSTER_COLUMNS: &[&str] = &["policy_id", "agent_id", "submit_date", "ltv_expected"];

/// Header-name to position lookup, validated against the required set.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn build(headers: &StringRecord, required: &[&str], table: TableKind) -> Result<Self> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !positions.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::Schema {
                table,
                columns: missing.join(", "),
            });
        }

        Ok(Self { positions })
    }

    /// Cell for a column already checked by `build`, trimmed.
    fn cell<'a>(&self, row: &'a StringRecord, column: &str) -> &'a str {
        self.positions
            .get(column)
            .and_then(|&idx| row.get(idx))
            .unwrap_or("")
            .trim()
    }
}

fn value_error(
    table: TableKind,
    row: usize,
    field: &'static str,
    message: impl Into<String>,
) -> EngineError {
    EngineError::Value {
        table,
        row,
        field,
        message: message.into(),
    }
}

fn parse_id(raw: &str, table: TableKind, row: usize, field: &'static str) -> Result<String> {
    if raw.is_empty() {
        return Err(value_error(table, row, field, "cannot be empty"));
    }
    Ok(raw.to_string())
}

fn parse_date(raw: &str, table: TableKind, row: usize, field: &'static str) -> Result<NaiveDate> {
    if raw.is_empty() {
        return Err(value_error(table, row, field, "cannot be empty"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        value_error(
            table,
            row,
            field,
            format!("must be in YYYY-MM-DD format, got: {raw}"),
        )
    })
}

fn parse_amount(raw: &str, table: TableKind, row: usize, field: &'static str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|_| value_error(table, row, field, format!("must be a valid number, got: {raw}")))
}

/// Read the carrier payment-remittance ledger.
pub fn read_payments<R: Read>(input: R) -> Result<Vec<PaymentRecord>> {
    let table = TableKind::CarrierRemittance;
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::build(&headers, LEDGER_COLUMNS, table)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_num = idx + 2; // 1-based, counting the header row
        let row = result?;

        let status_raw = columns.cell(&row, "status");
        let status = PolicyStatus::parse(status_raw).ok_or_else(|| {
            value_error(
                table,
                row_num,
                "status",
                format!("must be one of active, cancelled, got: {status_raw}"),
            )
        })?;

        records.push(PaymentRecord {
            policy_id: parse_id(columns.cell(&row, "policy_id"), table, row_num, "policy_id")?,
            agent_id: parse_id(columns.cell(&row, "agent_id"), table, row_num, "agent_id")?,
            carrier: columns.cell(&row, "carrier").to_string(),
            paid_date: parse_date(columns.cell(&row, "paid_date"), table, row_num, "paid_date")?,
            amount: parse_amount(columns.cell(&row, "amount"), table, row_num, "amount")?,
            status,
        });
    }

    debug!(records = records.len(), "parsed carrier remittance table");
    Ok(records)
}

/// Read the CRM policy roster.
pub fn read_roster<R: Read>(input: R) -> Result<Vec<PolicyRosterEntry>> {
    let table = TableKind::CrmPolicies;
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::build(&headers, ROSTER_COLUMNS, table)?;

    let mut entries = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_num = idx + 2;
        let row = result?;

        let ltv_expected = parse_amount(
            columns.cell(&row, "ltv_expected"),
            table,
            row_num,
            "ltv_expected",
        )?;
        if ltv_expected < Decimal::ZERO {
            return Err(value_error(
                table,
                row_num,
                "ltv_expected",
                format!("must be non-negative, got: {ltv_expected}"),
            ));
        }

        entries.push(PolicyRosterEntry {
            policy_id: parse_id(columns.cell(&row, "policy_id"), table, row_num, "policy_id")?,
            agent_id: parse_id(columns.cell(&row, "agent_id"), table, row_num, "agent_id")?,
            submit_date: parse_date(
                columns.cell(&row, "submit_date"),
                table,
                row_num,
                "submit_date",
            )?,
            ltv_expected,
        });
    }

    debug!(entries = entries.len(), "parsed CRM policies table");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ledger_parses_and_normalizes() {
        let csv = "policy_id,agent_id,carrier,paid_date,amount,status\n\
                   \u{20}P001 , A1 ,Humana,2025-07-01,200.50, ACTIVE \n\
                   P002,A2,UHC,2025-07-02,-75.00,cancelled\n";
        let records = read_payments(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].policy_id, "P001");
        assert_eq!(records[0].agent_id, "A1");
        assert_eq!(records[0].amount, dec!(200.50));
        assert_eq!(records[0].status, PolicyStatus::Active);
        assert_eq!(records[1].amount, dec!(-75.00));
        assert_eq!(records[1].status, PolicyStatus::Cancelled);
    }

    #[test]
    fn missing_ledger_columns_are_named() {
        let csv = "policy_id,agent_id,paid_date\nP001,A1,2025-07-01\n";
        let err = read_payments(csv.as_bytes()).unwrap_err();
        match err {
            EngineError::Schema { table, columns } => {
                assert_eq!(table, TableKind::CarrierRemittance);
                assert!(columns.contains("carrier"));
                assert!(columns.contains("amount"));
                assert!(columns.contains("status"));
                assert!(!columns.contains("policy_id"));
            }
            other => panic!("expected Schema error, got: {other}"),
        }
    }

    #[test]
    fn bad_status_reports_row_and_field() {
        let csv = "policy_id,agent_id,carrier,paid_date,amount,status\n\
                   P001,A1,Humana,2025-07-01,200,active\n\
                   P002,A1,Humana,2025-07-02,100,pending\n";
        let err = read_payments(csv.as_bytes()).unwrap_err();
        match err {
            EngineError::Value { row, field, .. } => {
                assert_eq!(row, 3);
                assert_eq!(field, "status");
            }
            other => panic!("expected Value error, got: {other}"),
        }
    }

    #[test]
    fn bad_date_fails_the_batch() {
        let csv = "policy_id,agent_id,carrier,paid_date,amount,status\n\
                   P001,A1,Humana,07/01/2025,200,active\n";
        let err = read_payments(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn empty_policy_id_is_rejected() {
        let csv = "policy_id,agent_id,carrier,paid_date,amount,status\n\
                   \u{20} ,A1,Humana,2025-07-01,200,active\n";
        let err = read_payments(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("policy_id"));
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn roster_rejects_negative_ltv() {
        let csv = "policy_id,agent_id,submit_date,ltv_expected\n\
                   P001,A1,2025-06-01,-100\n";
        let err = read_roster(csv.as_bytes()).unwrap_err();
        match err {
            EngineError::Value { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "ltv_expected");
            }
            other => panic!("expected Value error, got: {other}"),
        }
    }

    #[test]
    fn roster_missing_columns_are_named() {
        let csv = "policy_id,agent_id\nP001,A1\n";
        let err = read_roster(csv.as_bytes()).unwrap_err();
        match err {
            EngineError::Schema { table, columns } => {
                assert_eq!(table, TableKind::CrmPolicies);
                assert!(columns.contains("submit_date"));
                assert!(columns.contains("ltv_expected"));
            }
            other => panic!("expected Schema error, got: {other}"),
        }
    }

    #[test]
    fn empty_tables_are_valid() {
        let ledger = "policy_id,agent_id,carrier,paid_date,amount,status\n";
        assert!(read_payments(ledger.as_bytes()).unwrap().is_empty());
        let roster = "policy_id,agent_id,submit_date,ltv_expected\n";
        assert!(read_roster(roster.as_bytes()).unwrap().is_empty());
    }
}
