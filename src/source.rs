//! Transaction source: turns a JSON or CSV dataset into validated
//! [`Transaction`]s.
//!
//! All validation happens here. Downstream code can rely on every record
//! having a parsed date, a non-negative amount and a payment method from
//! the configured schema.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::IngestPolicy;
use crate::error::{DashboardError, RecordError, Result};
use crate::models::{parse_timestamp, PaymentMethod, PaymentSchema, Transaction};

/// Encoding of a transaction dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// A JSON array of transaction objects
    Json,
    /// CSV with a header row naming the transaction fields
    Csv,
}

impl DatasetFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(DatasetFormat::Json),
            "csv" => Ok(DatasetFormat::Csv),
            _ => Err(DashboardError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Record as it appears in the dataset, before validation
#[derive(Debug, Deserialize)]
struct RawTransaction {
    transaction_id: String,
    customer_name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    status: String,
    payment_method: String,
    date: String,
}

/// Read the amount from its text so no digits are lost to a float
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    let s = s.trim();
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| D::Error::custom(format!("invalid amount '{s}'")))
}

/// Replace a numeric `amount` with its literal text.
///
/// serde_json is built with `arbitrary_precision`, so the text is exactly
/// what the dataset contains.
fn amount_as_text(mut record: Value) -> Value {
    if let Some(Value::Number(number)) = record.get("amount") {
        let text = number.to_string();
        record["amount"] = Value::String(text);
    }
    record
}

/// Decode one element of a JSON dataset
fn decode_json_record(row: usize, record: Value) -> Result<RawTransaction> {
    let id = record
        .get("transaction_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    serde_json::from_value(amount_as_text(record)).map_err(|error| {
        DashboardError::MalformedRecord {
            row,
            id,
            reason: RecordError::Undecodable(error.to_string()),
        }
    })
}

impl RawTransaction {
    fn validate(self, schema: &PaymentSchema) -> std::result::Result<Transaction, RecordError> {
        let status = self.status.parse()?;
        let payment_method: PaymentMethod = self.payment_method.parse()?;
        if !schema.contains(payment_method) {
            return Err(RecordError::DisabledPaymentMethod(payment_method));
        }
        let date = parse_timestamp(&self.date)?;

        Transaction::new(
            self.transaction_id,
            self.customer_name,
            self.amount,
            status,
            payment_method,
            date,
        )
    }
}

/// Load and validate every transaction in `reader`.
///
/// Each record is decoded on its own, so a wrong-typed or missing field
/// affects only its row. Rows are numbered from 1 in error messages (array
/// index for JSON, data row for CSV). Duplicate ids are malformed. With [`IngestPolicy::Reject`]
/// the first malformed record aborts the load; with [`IngestPolicy::Skip`]
/// it is logged and dropped.
pub fn load_transactions<R: Read>(
    reader: R,
    format: DatasetFormat,
    schema: &PaymentSchema,
    policy: IngestPolicy,
) -> Result<Vec<Transaction>> {
    let raw_rows: Vec<Result<RawTransaction>> = match format {
        DatasetFormat::Json => serde_json::from_reader::<_, Vec<Value>>(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, record)| decode_json_record(index + 1, record))
            .collect(),
        DatasetFormat::Csv => csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .deserialize()
            .map(|row| row.map_err(DashboardError::from))
            .collect(),
    };

    let mut seen_ids = HashSet::new();
    let mut transactions = Vec::with_capacity(raw_rows.len());

    for (index, raw) in raw_rows.into_iter().enumerate() {
        let row = index + 1;

        let outcome = raw.and_then(|raw| {
            let id = raw.transaction_id.clone();
            raw.validate(schema)
                .and_then(|tx| {
                    if seen_ids.insert(tx.id().to_string()) {
                        Ok(tx)
                    } else {
                        Err(RecordError::DuplicateId)
                    }
                })
                .map_err(|reason| DashboardError::MalformedRecord { row, id, reason })
        });

        match outcome {
            Ok(tx) => transactions.push(tx),
            Err(error) => match policy {
                IngestPolicy::Reject => return Err(error),
                IngestPolicy::Skip => warn!(row, %error, "Skipping malformed transaction"),
            },
        }
    }

    debug!(count = transactions.len(), ?format, "Loaded transactions");

    Ok(transactions)
}

/// Open `path` and load it, choosing the format from the extension
pub fn load_transactions_from_path(
    path: &Path,
    schema: &PaymentSchema,
    policy: IngestPolicy,
) -> Result<Vec<Transaction>> {
    let format = DatasetFormat::from_path(path)?;
    let file = File::open(path)?;
    load_transactions(BufReader::new(file), format, schema, policy)
}
