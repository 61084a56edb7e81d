//! Pure aggregation helpers for dashboard figures.
//!
//! Everything here operates on already-fetched rows and is recomputed on
//! every request; nothing is persisted. Handlers fetch via the repositories
//! and reduce with these functions.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::status::{InvoiceStatus, ProjectStatus};

/// Milestone completion as a whole-number percentage.
///
/// Rounds to the nearest integer and returns 0 when there are no milestones
/// at all (a project with nothing planned is 0% done, not 100%).
pub fn milestone_progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64) * 100.0;
    pct.round() as u8
}

/// Sum of invoice amounts.
pub fn invoice_total<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    amounts.into_iter().copied().sum()
}

/// Sum of invoice amounts restricted to a single status.
pub fn invoice_total_by_status<'a>(
    invoices: impl IntoIterator<Item = (&'a Decimal, InvoiceStatus)>,
    status: InvoiceStatus,
) -> Decimal {
    invoices
        .into_iter()
        .filter(|(_, s)| *s == status)
        .map(|(amount, _)| *amount)
        .sum()
}

/// Number of projects in each status.
pub fn count_by_status(
    statuses: impl IntoIterator<Item = ProjectStatus>,
) -> HashMap<ProjectStatus, usize> {
    let mut counts = HashMap::new();
    for status in statuses {
        *counts.entry(status).or_insert(0) += 1;
    }
    counts
}
