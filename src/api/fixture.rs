use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{DataResponse, FilterField, Record, RecordSet};
use crate::query::DataQuery;
use super::FinancialDataProvider;

/// Accepted fixture layouts: the raw upstream array or the `/data` envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Bare(Vec<Record>),
    Envelope(DataResponse),
}

/// Server-side filter semantics of the `/data` endpoint
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_revenue: Option<i64>,
    pub max_revenue: Option<i64>,
    pub min_net_income: Option<i64>,
    pub max_net_income: Option<i64>,
}

impl RecordFilter {
    /// Interpret query parameters the way the backend does: dates are compared
    /// as strings, numeric bounds must be integers.
    pub fn from_query(query: &DataQuery) -> Result<Self, ApiError> {
        let int_param = |field: FilterField| -> Result<Option<i64>, ApiError> {
            query
                .get(field.param_name())
                .map(|value| {
                    value.parse::<i64>().map_err(|_| ApiError::InvalidParameter {
                        param: field.param_name(),
                        value: value.to_string(),
                    })
                })
                .transpose()
        };

        Ok(Self {
            start_date: query.get(FilterField::StartDate.param_name()).map(str::to_string),
            end_date: query.get(FilterField::EndDate.param_name()).map(str::to_string),
            min_revenue: int_param(FilterField::MinRevenue)?,
            max_revenue: int_param(FilterField::MaxRevenue)?,
            min_net_income: int_param(FilterField::MinNetIncome)?,
            max_net_income: int_param(FilterField::MaxNetIncome)?,
        })
    }

    /// Inclusive bounds on every set field
    pub fn matches(&self, record: &Record) -> bool {
        let date = record.date.as_str();
        self.start_date.as_deref().map_or(true, |start| date >= start)
            && self.end_date.as_deref().map_or(true, |end| date <= end)
            && self.min_revenue.map_or(true, |min| record.revenue >= min as f64)
            && self.max_revenue.map_or(true, |max| record.revenue <= max as f64)
            && self.min_net_income.map_or(true, |min| record.net_income >= min as f64)
            && self.max_net_income.map_or(true, |max| record.net_income <= max as f64)
    }
}

/// Offline data source reading records from a JSON file.
///
/// The file is re-read on every fetch so edits show up on the next filter
/// change.
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<RecordSet, ApiError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = match serde_json::from_str::<FixtureFile>(&content)? {
            FixtureFile::Bare(records) => records,
            FixtureFile::Envelope(response) => response.into_records(),
        };
        debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[async_trait::async_trait]
impl FinancialDataProvider for FixtureProvider {
    async fn fetch_records(&self, query: &DataQuery) -> Result<RecordSet, ApiError> {
        let filter = RecordFilter::from_query(query)?;
        info!("Reading fixture {} with query {:?}", self.path.display(), query.to_query_string());

        let records = self.load().await?;
        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    fn source_name(&self) -> String {
        format!("fixture:{}", self.path.display())
    }
}
