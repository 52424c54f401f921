use thiserror::Error;

/// Which of the two input tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    CarrierRemittance,
    CrmPolicies,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::CarrierRemittance => write!(f, "carrier remittance"),
            TableKind::CrmPolicies => write!(f, "CRM policies"),
        }
    }
}

/// Main error type for the commission advance engine.
///
/// `Schema` and `Value` mean the caller's input is bad; `Computation` means
/// the engine itself failed. Any bad row fails the whole batch — silently
/// skipping rows would corrupt the financial aggregates undetectably.
#[derive(Error, Debug)]
pub enum EngineError {
    // Input validation errors
    #[error("{table} is missing required column(s): {columns}")]
    Schema { table: TableKind, columns: String },

    /// `row` is 1-based counting the header row, so the first data row is 2.
    #[error("{table} row {row}: {field} {message}")]
    Value {
        table: TableKind,
        row: usize,
        field: &'static str,
        message: String,
    },

    // Internal errors
    #[error("computation failed: {0}")]
    Computation(String),

    // Collaborator errors
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// True when the caller's input, not this service, is at fault.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            EngineError::Schema { .. } | EngineError::Value { .. } | EngineError::Csv(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_names_table_row_and_field() {
        let err = EngineError::Value {
            table: TableKind::CarrierRemittance,
            row: 4,
            field: "amount",
            message: "must be a valid number, got: abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("carrier remittance"));
        assert!(msg.contains("row 4"));
        assert!(msg.contains("amount"));
        assert!(err.is_client_fault());
    }

    #[test]
    fn computation_error_is_not_client_fault() {
        assert!(!EngineError::Computation("overflow".to_string()).is_client_fault());
    }
}
