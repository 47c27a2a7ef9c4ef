use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::transaction::PaymentMethod;

/// Day-level label format shared by all volume buckets
pub const DAY_LABEL_FORMAT: &str = "%b %d";

/// Headline figures shown on the KPI cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_revenue: Decimal,
    pub transaction_count: usize,
    /// Whole percent of transactions with status `Success`, 0 when empty
    pub success_rate: u32,
    /// Trend indicator supplied from outside the transaction list
    pub revenue_change: Decimal,
}

/// Summed volume for one day or week of the trailing window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBucket {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_amount: Decimal,
}

impl VolumeBucket {
    /// Create an empty bucket covering `[start, end]` inclusive
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let label = if start == end {
            start.format(DAY_LABEL_FORMAT).to_string()
        } else {
            format!(
                "{} - {}",
                start.format(DAY_LABEL_FORMAT),
                end.format(DAY_LABEL_FORMAT)
            )
        };

        Self {
            label,
            start,
            end,
            total_amount: Decimal::ZERO,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

/// Count of transactions for one payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodCount {
    pub method: PaymentMethod,
    pub count: usize,
}

/// Transaction counts per payment method, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDistribution {
    entries: Vec<MethodCount>,
}

impl MethodDistribution {
    pub fn new(entries: Vec<MethodCount>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MethodCount] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.method.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.count).collect()
    }

    /// Count for a single method, 0 when the method is not in the schema
    pub fn count_for(&self, method: PaymentMethod) -> usize {
        self.entries
            .iter()
            .find(|e| e.method == method)
            .map_or(0, |e| e.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

// Serialized as parallel label/count arrays, the shape chart datasets expect
#[derive(Serialize)]
struct MethodDistributionSerialized {
    labels: Vec<&'static str>,
    counts: Vec<usize>,
    total: usize,
}

impl Serialize for MethodDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wrapper = MethodDistributionSerialized {
            labels: self.labels(),
            counts: self.counts(),
            total: self.total(),
        };
        wrapper.serialize(serializer)
    }
}
