//! Search, filter, sort and paginate the transaction table.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{SortKey, Transaction, ViewPage, ViewState};

/// Produce the table page for `view`.
///
/// Filters are combined with AND, the sort is stable, and an out-of-range
/// page number is clamped rather than rejected. A page size of zero is
/// treated as one.
pub fn apply_view(transactions: &[Transaction], view: &ViewState) -> ViewPage {
    let needle = view.search_term.to_lowercase();

    let mut filtered: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| matches_view(tx, view, &needle))
        .collect();

    // slice::sort_by is stable, equal keys keep their input order
    filtered.sort_by(|a, b| compare(a, b, view.sort_key));

    let page = paginate(&filtered, view.page_number, view.page_size.max(1));

    debug!(
        filtered = page.filtered_count,
        page = page.current_page,
        total_pages = page.total_pages,
        "Applied table view"
    );

    page
}

fn matches_view(tx: &Transaction, view: &ViewState, needle: &str) -> bool {
    let matches_search = needle.is_empty()
        || tx.id().to_lowercase().contains(needle)
        || tx.customer_name().to_lowercase().contains(needle);

    let matches_amount = view
        .amount_ceiling
        .map_or(true, |ceiling| tx.amount() <= ceiling);

    let matches_method = view
        .payment_method
        .map_or(true, |method| tx.payment_method() == method);

    matches_search && matches_amount && matches_method
}

fn compare(a: &Transaction, b: &Transaction, sort_key: SortKey) -> Ordering {
    match sort_key {
        SortKey::Date => b.date().cmp(&a.date()),
        SortKey::Amount => b.amount().cmp(&a.amount()),
        SortKey::Payment => a.payment_method().as_str().cmp(b.payment_method().as_str()),
    }
}

fn paginate(rows: &[&Transaction], page_number: usize, page_size: usize) -> ViewPage {
    let filtered_count = rows.len();
    let total_pages = filtered_count.div_ceil(page_size);
    let current_page = page_number.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(filtered_count);
    let page = rows
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|tx| (*tx).clone())
        .collect();

    ViewPage {
        page,
        total_pages,
        current_page,
        filtered_count,
    }
}
