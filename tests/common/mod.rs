#![allow(dead_code)]

use payments_dashboard::config::DashboardConfig;
use payments_dashboard::models::{
    parse_timestamp, PaymentMethod, Transaction, TransactionStatus, ViewState,
};
use payments_dashboard::process_dataset;
use payments_dashboard::source::DatasetFormat;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const FIXTURE_JSON: &str = "tests/fixtures/transactions.json";
pub const FIXTURE_CSV: &str = "tests/fixtures/transactions.csv";

/// Helper to create a transaction with all fields
pub fn make_transaction(
    id: &str,
    customer_name: &str,
    amount: Decimal,
    status: TransactionStatus,
    payment_method: PaymentMethod,
    date: &str,
) -> Transaction {
    Transaction::new(
        id,
        customer_name,
        amount,
        status,
        payment_method,
        parse_timestamp(date).unwrap(),
    )
    .unwrap()
}

/// Helper to create a successful card payment
pub fn make_card(id: &str, amount: Decimal, date: &str) -> Transaction {
    make_transaction(
        id,
        "Test Customer",
        amount,
        TransactionStatus::Success,
        PaymentMethod::Card,
        date,
    )
}

/// The three-record dataset used by the worked examples
pub fn three_transactions() -> Vec<Transaction> {
    vec![
        make_transaction(
            "TX-1",
            "Amaka",
            dec!(5000),
            TransactionStatus::Success,
            PaymentMethod::Card,
            "2024-01-01",
        ),
        make_transaction(
            "TX-2",
            "Bode",
            dec!(15000),
            TransactionStatus::Failed,
            PaymentMethod::Cash,
            "2024-01-02",
        ),
        make_transaction(
            "TX-3",
            "Chioma",
            dec!(7000),
            TransactionStatus::Success,
            PaymentMethod::Card,
            "2024-01-03",
        ),
    ]
}

/// Ids of a page, in order
pub fn ids(transactions: &[Transaction]) -> Vec<&str> {
    transactions.iter().map(|tx| tx.id()).collect()
}

/// Process a JSON dataset string and parse the snapshot output
pub fn process_json_string(
    json_input: &str,
    view: &ViewState,
    config: &DashboardConfig,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let mut output = Vec::new();
    process_dataset(json_input.as_bytes(), DatasetFormat::Json, view, config, &mut output)?;
    Ok(serde_json::from_slice(&output)?)
}

/// Build a JSON dataset from (id, customer, amount, status, method, date) tuples
pub fn build_json(rows: &[(&str, &str, &str, &str, &str, &str)]) -> String {
    let records: Vec<serde_json::Value> = rows
        .iter()
        .map(|(id, customer, amount, status, method, date)| {
            serde_json::json!({
                "transaction_id": id,
                "customer_name": customer,
                "amount": amount_literal(amount),
                "status": status,
                "payment_method": method,
                "date": date,
            })
        })
        .collect();

    serde_json::Value::Array(records).to_string()
}

/// A numeric amount stays an exact JSON number, anything else becomes a string
fn amount_literal(amount: &str) -> serde_json::Value {
    serde_json::from_str::<serde_json::Number>(amount)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|_| serde_json::Value::String(amount.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_card() {
        let tx = make_card("TX-9", dec!(12.5), "2024-03-01T08:00:00");
        assert_eq!(tx.id(), "TX-9");
        assert_eq!(tx.amount(), dec!(12.5));
        assert_eq!(tx.payment_method(), PaymentMethod::Card);
        assert_eq!(tx.status(), TransactionStatus::Success);
    }

    #[test]
    fn test_build_json() {
        let json = build_json(&[("TX-1", "Ada", "10", "Success", "Card", "2024-01-01")]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["transaction_id"], "TX-1");
        assert_eq!(parsed[0]["amount"], 10);
        assert_eq!(parsed[0]["payment_method"], "Card");
    }

    #[test]
    fn test_build_json_keeps_amount_digits() {
        let json = build_json(&[
            ("TX-1", "Ada", "12345678901234567.89", "Success", "Card", "2024-01-01"),
            ("TX-2", "Ada", "lots", "Success", "Card", "2024-01-01"),
        ]);

        assert!(json.contains(r#""amount":12345678901234567.89"#));
        assert!(json.contains(r#""amount":"lots""#));
    }
}
