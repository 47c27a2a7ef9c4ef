//! KPI totals and chart series derived from the full transaction list.
//!
//! Every function here is pure: it borrows the list, never mutates it, and
//! returns freshly computed values.

use chrono::{Days, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{
    KpiSummary, MethodCount, MethodDistribution, PaymentSchema, Transaction, TransactionStatus,
    VolumeBucket,
};

/// Number of buckets shown on the volume chart
pub const DEFAULT_BUCKET_COUNT: usize = 7;

/// Width of one volume bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketUnit {
    #[default]
    Day,
    Week,
}

impl BucketUnit {
    pub fn days(&self) -> u64 {
        match self {
            BucketUnit::Day => 1,
            BucketUnit::Week => 7,
        }
    }
}

/// Where the trailing bucket window ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    /// The most recent transaction date in the list
    #[default]
    LatestTransaction,
    /// Today, in the local time zone
    WallClock,
    Fixed(NaiveDate),
}

impl AnchorStrategy {
    /// Resolve the anchor day, `None` when anchoring on an empty list
    pub fn resolve(&self, transactions: &[Transaction]) -> Option<NaiveDate> {
        match self {
            AnchorStrategy::LatestTransaction => transactions.iter().map(Transaction::day).max(),
            AnchorStrategy::WallClock => Some(Local::now().date_naive()),
            AnchorStrategy::Fixed(day) => Some(*day),
        }
    }
}

/// Shape of the volume chart's trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeWindow {
    pub unit: BucketUnit,
    pub count: usize,
    pub anchor: AnchorStrategy,
}

impl Default for VolumeWindow {
    fn default() -> Self {
        Self {
            unit: BucketUnit::Day,
            count: DEFAULT_BUCKET_COUNT,
            anchor: AnchorStrategy::LatestTransaction,
        }
    }
}

/// Compute the KPI card figures
pub fn compute_kpi_summary(transactions: &[Transaction], revenue_change: Decimal) -> KpiSummary {
    let total_revenue: Decimal = transactions.iter().map(Transaction::amount).sum();
    let successes = transactions
        .iter()
        .filter(|t| t.status() == TransactionStatus::Success)
        .count();

    KpiSummary {
        total_revenue,
        transaction_count: transactions.len(),
        success_rate: success_rate(successes, transactions.len()),
        revenue_change,
    }
}

/// `round(100 * successes / total)` with halves rounded up; 0 for an empty list
fn success_rate(successes: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * successes + total) / (2 * total)) as u32
}

/// Sum transaction amounts into a trailing window of day or week buckets.
///
/// Buckets step backward from the anchor and are returned oldest first.
/// Each bucket covers `unit` whole days, both ends inclusive, and the
/// newest one ends on the anchor day. A week bucket is therefore
/// `[anchor - 6, anchor]` rather than `[anchor, anchor + 6]`, so the
/// anchor's own week is always in the window and no bucket reaches past
/// the latest data. Consecutive ranges touch without overlapping.
/// Transactions outside the window are not counted anywhere.
pub fn compute_volume_buckets(
    transactions: &[Transaction],
    window: &VolumeWindow,
) -> Vec<VolumeBucket> {
    let Some(anchor) = window.anchor.resolve(transactions) else {
        debug!("No anchor date for an empty transaction list, skipping volume buckets");
        return Vec::new();
    };

    let span = window.unit.days();
    let mut buckets: Vec<VolumeBucket> = (0..window.count as u64)
        .map_while(|step| {
            let end = anchor.checked_sub_days(Days::new(span * step))?;
            let start = end.checked_sub_days(Days::new(span - 1))?;
            Some(VolumeBucket::new(start, end))
        })
        .collect();
    buckets.reverse();

    for bucket in &mut buckets {
        let total: Decimal = transactions
            .iter()
            .filter(|t| bucket.contains(t.day()))
            .map(Transaction::amount)
            .sum();
        bucket.total_amount = total;
    }

    debug!(
        %anchor,
        unit = ?window.unit,
        buckets = buckets.len(),
        "Computed volume buckets"
    );

    buckets
}

/// Count transactions per payment method in schema order.
///
/// A method outside the schema means the source let a malformed record
/// through, which is reported rather than silently dropped.
pub fn compute_method_distribution(
    transactions: &[Transaction],
    schema: &PaymentSchema,
) -> Result<MethodDistribution> {
    let methods = schema.methods();
    let mut counts = [0usize; 3];

    for tx in transactions {
        let index = methods
            .iter()
            .position(|method| *method == tx.payment_method())
            .ok_or_else(|| DashboardError::UnexpectedPaymentMethod {
                id: tx.id().to_string(),
                method: tx.payment_method(),
            })?;
        counts[index] += 1;
    }

    let entries = methods
        .into_iter()
        .zip(counts)
        .map(|(method, count)| MethodCount { method, count })
        .collect();

    Ok(MethodDistribution::new(entries))
}
