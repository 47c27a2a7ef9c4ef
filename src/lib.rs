pub mod aggregation;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod view;

use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::Serialize;

use aggregation::{compute_kpi_summary, compute_method_distribution, compute_volume_buckets};
use config::DashboardConfig;
use error::Result;
use models::{
    KpiSummary, MethodDistribution, PaymentMethod, Transaction, ViewPage, ViewState, VolumeBucket,
};
use source::{load_transactions, DatasetFormat};
use view::apply_view;

/// Choices the table filters offer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub payment_methods: Vec<PaymentMethod>,
    pub amount_ceilings: Vec<Decimal>,
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub kpi: KpiSummary,
    pub volume: Vec<VolumeBucket>,
    pub payment_methods: MethodDistribution,
    pub table: ViewPage,
    pub filter_options: FilterOptions,
}

/// Run both the aggregation engine and the view pipeline over `transactions`
pub fn build_snapshot(
    transactions: &[Transaction],
    view: &ViewState,
    config: &DashboardConfig,
) -> Result<DashboardSnapshot> {
    let schema = config.payment_schema();

    Ok(DashboardSnapshot {
        kpi: compute_kpi_summary(transactions, config.revenue_change),
        volume: compute_volume_buckets(transactions, &config.volume_window()),
        payment_methods: compute_method_distribution(transactions, &schema)?,
        table: apply_view(transactions, view),
        filter_options: FilterOptions {
            payment_methods: schema.methods().to_vec(),
            amount_ceilings: config.amount_ceilings(),
        },
    })
}

/// Load a dataset from a reader and write its dashboard snapshot as JSON
pub fn process_dataset<R: Read, W: Write>(
    reader: R,
    format: DatasetFormat,
    view: &ViewState,
    config: &DashboardConfig,
    mut writer: W,
) -> Result<()> {
    let transactions = load_transactions(
        reader,
        format,
        &config.payment_schema(),
        config.ingest_policy,
    )?;

    let snapshot = build_snapshot(&transactions, view, config)?;

    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
