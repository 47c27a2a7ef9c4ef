use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::PaymentMethod;

/// Errors that can occur while loading a dataset or building a dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Malformed record at row {row} ('{id}'): {reason}")]
    MalformedRecord {
        row: usize,
        id: String,
        reason: RecordError,
    },

    #[error("Unsupported dataset format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),

    /// A transaction reached the aggregation engine with a method the
    /// configured schema does not know about
    #[error("Transaction '{id}' uses payment method '{method}' outside the configured schema")]
    UnexpectedPaymentMethod { id: String, method: PaymentMethod },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Reasons a single transaction record is rejected at ingestion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("transaction id is empty")]
    MissingId,

    #[error("record could not be decoded: {0}")]
    Undecodable(String),

    #[error("duplicate transaction id")]
    DuplicateId,

    #[error("amount {0} is negative")]
    NegativeAmount(Decimal),

    #[error("date '{0}' is not a valid ISO-8601 date or date-time")]
    InvalidDate(String),

    #[error("unknown status '{0}'")]
    UnknownStatus(String),

    #[error("unknown payment method '{0}'")]
    UnknownPaymentMethod(String),

    #[error("payment method '{0}' is not enabled for this dataset")]
    DisabledPaymentMethod(PaymentMethod),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
