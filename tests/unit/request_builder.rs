use fin_dashboard::models::{FilterCriteria, FilterField};
use fin_dashboard::query::DataQuery;
use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::logging;

/// Every subset of set/unset fields produces exactly the set parameters
#[test]
fn test_query_contains_exactly_the_set_fields() {
    logging::log_test_step("Checking all 64 filter combinations");

    for mask in 0u32..(1 << FilterField::ALL.len()) {
        let mut filters = FilterCriteria::default();
        for (i, field) in FilterField::ALL.iter().enumerate() {
            let value = if mask & (1 << i) != 0 { "7" } else { "" };
            filters.set(*field, value);
        }

        let query = DataQuery::from_filters(&filters);
        let sent: Vec<&str> = query.params().iter().map(|(name, _)| *name).collect();
        let expected: Vec<&str> = FilterField::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, field)| field.param_name())
            .collect();

        assert_eq!(sent, expected, "mask {:06b}", mask);
        assert!(!query.to_query_string().contains("=&"));
        assert!(!query.to_query_string().ends_with('='));
    }
}

#[test]
fn test_min_revenue_only() {
    let filters = FilterCriteria::default().with(FilterField::MinRevenue, "1000");
    assert_eq!(DataQuery::from(&filters).to_query_string(), "min_revenue=1000");
}

#[test]
fn test_date_range() {
    let filters = FilterCriteria::default()
        .with(FilterField::StartDate, "2020-09-26")
        .with(FilterField::EndDate, "2024-09-28");
    assert_eq!(
        DataQuery::from_filters(&filters).apply_to("https://example.com/data"),
        "https://example.com/data?start_date=2020-09-26&end_date=2024-09-28"
    );
}
