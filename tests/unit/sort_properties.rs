use fin_dashboard::models::{Record, SortCriteria, SortDirection, SortField};
use fin_dashboard::sort::{compare_by, sort_records};
use std::cmp::Ordering;
use test_log::test;

use crate::common::test_data;

const FIELDS: [SortField; 3] = [SortField::Date, SortField::Revenue, SortField::NetIncome];
const DIRECTIONS: [SortDirection; 2] = [SortDirection::Ascending, SortDirection::Descending];

fn all_criteria() -> Vec<SortCriteria> {
    FIELDS
        .iter()
        .flat_map(|field| DIRECTIONS.iter().map(move |dir| SortCriteria::new(*field, *dir)))
        .collect()
}

fn canonical(records: &[Record]) -> Vec<String> {
    let mut keys: Vec<String> = records.iter().map(|r| format!("{:?}", r)).collect();
    keys.sort();
    keys
}

#[test]
fn test_sorted_output_is_a_permutation() {
    for seed in 0..20 {
        let records = test_data::generate_records(seed, 25);
        for criteria in all_criteria() {
            let sorted = sort_records(&records, criteria);
            assert_eq!(sorted.len(), records.len());
            assert_eq!(canonical(&sorted), canonical(&records));
        }
    }
}

#[test]
fn test_sorted_output_is_ordered() {
    for seed in 0..20 {
        let records = test_data::generate_records(seed, 25);
        for criteria in all_criteria() {
            let sorted = sort_records(&records, criteria);
            for pair in sorted.windows(2) {
                let ordering = compare_by(&pair[0], &pair[1], criteria.field);
                match criteria.direction {
                    SortDirection::Ascending => assert_ne!(ordering, Ordering::Greater),
                    SortDirection::Descending => assert_ne!(ordering, Ordering::Less),
                }
            }
        }
    }
}

#[test]
fn test_sorting_is_idempotent() {
    for seed in 0..20 {
        let records = test_data::generate_records(seed, 25);
        for criteria in all_criteria() {
            let once = sort_records(&records, criteria);
            let twice = sort_records(&once, criteria);
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn test_header_clicks() {
    let mut sort = SortCriteria::default();
    sort.toggle(SortField::Date);
    assert_eq!(sort, SortCriteria::new(SortField::Date, SortDirection::Descending));
    sort.toggle(SortField::Revenue);
    assert_eq!(sort, SortCriteria::new(SortField::Revenue, SortDirection::Ascending));
}
