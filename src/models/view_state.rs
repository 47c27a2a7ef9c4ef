use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{PaymentMethod, Transaction};

/// Rows per table page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Column the transaction table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first
    #[default]
    Date,
    /// Largest first
    Amount,
    /// Alphabetical by payment method label
    Payment,
}

/// Search, filter, sort and page selection for the transaction table.
///
/// An immutable snapshot; build a new one for every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: SortKey,
    /// Inclusive upper bound on `amount`
    pub amount_ceiling: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    /// 1-based, clamped into range by the pipeline
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: SortKey::default(),
            amount_ceiling: None,
            payment_method: None,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn sorted_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_amount_ceiling(mut self, ceiling: Option<Decimal>) -> Self {
        self.amount_ceiling = ceiling;
        self
    }

    pub fn with_payment_method(mut self, method: Option<PaymentMethod>) -> Self {
        self.payment_method = method;
        self
    }

    pub fn on_page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// One page of the filtered, sorted table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage {
    pub page: Vec<Transaction>,
    pub total_pages: usize,
    pub current_page: usize,
    pub filtered_count: usize,
}

impl ViewPage {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
