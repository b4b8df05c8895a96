//! Sort engine for the records table.

use std::cmp::Ordering;

use crate::models::{Record, SortCriteria, SortDirection, SortField};

/// Three-way comparison of two records on a single field
pub fn compare_by(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Revenue => a.revenue.total_cmp(&b.revenue),
        SortField::NetIncome => a.net_income.total_cmp(&b.net_income),
    }
}

/// Return a sorted copy of `records`. The input is left untouched and equal
/// keys keep their source order.
pub fn sort_records(records: &[Record], criteria: SortCriteria) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(a, b, criteria.field);
        match criteria.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}
