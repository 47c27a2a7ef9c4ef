//! Dashboard configuration.
//!
//! Loaded from a YAML file; every field has a default so an empty file (or
//! no file at all) yields the stock dashboard.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::{AnchorStrategy, BucketUnit, VolumeWindow, DEFAULT_BUCKET_COUNT};
use crate::error::{DashboardError, Result};
use crate::models::{AlternativeMethod, PaymentSchema, ViewState, DEFAULT_PAGE_SIZE};

/// What to do with a record that fails validation at ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
    /// Abort the whole load on the first malformed record
    #[default]
    Reject,
    /// Drop the record, log a warning and keep going
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows per table page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub bucket_unit: BucketUnit,
    /// Buckets in the volume chart window
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
    #[serde(default)]
    pub anchor: AnchorStrategy,
    /// Third payment method next to bank transfers and cards
    #[serde(default)]
    pub alternative_method: AlternativeMethod,
    /// Revenue trend shown next to the total, in percent
    #[serde(default = "default_revenue_change")]
    pub revenue_change: Decimal,
    #[serde(default)]
    pub ingest_policy: IngestPolicy,
    /// Distance between the amount ceilings offered as table filters
    #[serde(default = "default_amount_ceiling_step")]
    pub amount_ceiling_step: Decimal,
    /// How many amount ceilings to offer
    #[serde(default = "default_amount_ceiling_options")]
    pub amount_ceiling_options: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_bucket_count() -> usize {
    DEFAULT_BUCKET_COUNT
}

fn default_revenue_change() -> Decimal {
    Decimal::new(52, 1)
}

fn default_amount_ceiling_step() -> Decimal {
    Decimal::from(10_000)
}

fn default_amount_ceiling_options() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            bucket_unit: BucketUnit::default(),
            bucket_count: default_bucket_count(),
            anchor: AnchorStrategy::default(),
            alternative_method: AlternativeMethod::default(),
            revenue_change: default_revenue_change(),
            ingest_policy: IngestPolicy::default(),
            amount_ceiling_step: default_amount_ceiling_step(),
            amount_ceiling_options: default_amount_ceiling_options(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "Loaded dashboard configuration");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.bucket_count == 0 {
            return Err(DashboardError::InvalidConfig(
                "bucket_count must be at least 1".to_string(),
            ));
        }
        if self.amount_ceiling_step <= Decimal::ZERO {
            return Err(DashboardError::InvalidConfig(
                "amount_ceiling_step must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn payment_schema(&self) -> PaymentSchema {
        PaymentSchema::new(self.alternative_method)
    }

    pub fn volume_window(&self) -> VolumeWindow {
        VolumeWindow {
            unit: self.bucket_unit,
            count: self.bucket_count,
            anchor: self.anchor,
        }
    }

    /// Amount ceilings offered by the table filter, ascending
    pub fn amount_ceilings(&self) -> Vec<Decimal> {
        (1..=self.amount_ceiling_options)
            .map(|n| self.amount_ceiling_step * Decimal::from(n as u64))
            .collect()
    }

    /// A fresh table view using the configured page size
    pub fn default_view(&self) -> ViewState {
        ViewState::default().with_page_size(self.page_size)
    }
}
