use crate::error::ApiError;
use crate::models::RecordSet;
use crate::query::DataQuery;

pub mod data_client;
pub mod fixture;
pub use data_client::DataClient;
pub use fixture::FixtureProvider;

/// Source of financial records for the dashboard
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FinancialDataProvider: Send + Sync {
    /// Perform exactly one fetch for the given query. No retry.
    async fn fetch_records(&self, query: &DataQuery) -> Result<RecordSet, ApiError>;

    /// Human readable name of the source, shown in the header
    fn source_name(&self) -> String;
}
