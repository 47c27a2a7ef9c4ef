use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

const DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Outcome of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
}

impl FromStr for TransactionStatus {
    type Err = RecordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Success" => Ok(Self::Success),
            "Failed" => Ok(Self::Failed),
            "Pending" => Ok(Self::Pending),
            other => Err(RecordError::UnknownStatus(other.to_string())),
        }
    }
}

/// How a payment was made.
///
/// Only three of these are enabled for any one dataset, see [`PaymentSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Card,
    Cash,
    Wallet,
}

impl PaymentMethod {
    /// The display label, which is also the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = RecordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Bank Transfer" => Ok(Self::BankTransfer),
            "Card" => Ok(Self::Card),
            "Cash" => Ok(Self::Cash),
            "Wallet" => Ok(Self::Wallet),
            other => Err(RecordError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// The third payment method offered next to bank transfers and cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeMethod {
    #[default]
    Cash,
    Wallet,
}

/// The closed, ordered set of payment methods a dataset may use.
///
/// The order drives the method distribution (and with it chart legend and
/// color assignment) as well as the filter options offered to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaymentSchema {
    pub alternative: AlternativeMethod,
}

impl PaymentSchema {
    pub fn new(alternative: AlternativeMethod) -> Self {
        Self { alternative }
    }

    pub fn methods(&self) -> [PaymentMethod; 3] {
        let third = match self.alternative {
            AlternativeMethod::Cash => PaymentMethod::Cash,
            AlternativeMethod::Wallet => PaymentMethod::Wallet,
        };
        [PaymentMethod::BankTransfer, PaymentMethod::Card, third]
    }

    pub fn contains(&self, method: PaymentMethod) -> bool {
        self.methods().contains(&method)
    }
}

/// A single, validated payment record.
///
/// Fields are private so that every instance upholds `amount >= 0` and a
/// non-empty id; construct through [`Transaction::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    id: String,
    customer_name: String,
    amount: Decimal,
    status: TransactionStatus,
    payment_method: PaymentMethod,
    date: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        customer_name: impl Into<String>,
        amount: Decimal,
        status: TransactionStatus,
        payment_method: PaymentMethod,
        date: NaiveDateTime,
    ) -> Result<Self, RecordError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RecordError::MissingId);
        }
        if amount < Decimal::ZERO {
            return Err(RecordError::NegativeAmount(amount));
        }

        Ok(Self {
            id,
            customer_name: customer_name.into(),
            amount,
            status,
            payment_method,
            date,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Calendar day of the transaction, used for bucketing
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Parse an ISO-8601 date or date-time.
///
/// Timestamps carrying an offset are normalised to UTC; plain dates map to
/// midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, RecordError> {
    let value = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date_time);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RecordError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_timestamp("2024-01-03").unwrap(), midnight(2024, 1, 3));
    }

    #[test]
    fn test_parse_local_date_time() {
        let parsed = parse_timestamp("2024-01-03T14:30:00").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(parsed.format("%H:%M").to_string(), "14:30");
    }

    #[test]
    fn test_parse_offset_is_normalised_to_utc() {
        let parsed = parse_timestamp("2024-01-03T01:00:00+02:00").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(parsed.format("%H:%M").to_string(), "23:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(RecordError::InvalidDate("yesterday".to_string()))
        );
        assert!(parse_timestamp("2024-02-30").is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Transaction::new(
            "tx-1",
            "Ada",
            dec!(-1),
            TransactionStatus::Success,
            PaymentMethod::Card,
            midnight(2024, 1, 1),
        );
        assert_eq!(result, Err(RecordError::NegativeAmount(dec!(-1))));
    }

    #[test]
    fn test_zero_amount_accepted() {
        let tx = Transaction::new(
            "tx-1",
            "Ada",
            dec!(0),
            TransactionStatus::Pending,
            PaymentMethod::Cash,
            midnight(2024, 1, 1),
        )
        .unwrap();
        assert_eq!(tx.amount(), dec!(0));
    }

    #[test]
    fn test_blank_id_rejected() {
        let result = Transaction::new(
            "  ",
            "Ada",
            dec!(1),
            TransactionStatus::Success,
            PaymentMethod::Card,
            midnight(2024, 1, 1),
        );
        assert_eq!(result, Err(RecordError::MissingId));
    }

    #[test]
    fn test_schema_order_follows_alternative() {
        let cash = PaymentSchema::default();
        assert_eq!(
            cash.methods(),
            [PaymentMethod::BankTransfer, PaymentMethod::Card, PaymentMethod::Cash]
        );
        assert!(!cash.contains(PaymentMethod::Wallet));

        let wallet = PaymentSchema::new(AlternativeMethod::Wallet);
        assert_eq!(wallet.methods()[2], PaymentMethod::Wallet);
        assert!(!wallet.contains(PaymentMethod::Cash));
    }

    #[test]
    fn test_method_labels_round_trip_through_from_str() {
        for method in [
            PaymentMethod::BankTransfer,
            PaymentMethod::Card,
            PaymentMethod::Cash,
            PaymentMethod::Wallet,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
        assert!("Crypto".parse::<PaymentMethod>().is_err());
    }
}
