use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::models::{Config, DataResponse, RecordSet};
use crate::query::DataQuery;
use super::FinancialDataProvider;

/// HTTP client for the `/data` endpoint
pub struct DataClient {
    client: Client,
    data_url: String,
}

impl DataClient {
    /// Create a new data client
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            data_url: config.data_url(),
        })
    }

    /// Fetch the records matching `query`
    pub async fn fetch_records(&self, query: &DataQuery) -> Result<RecordSet, ApiError> {
        let url = query.apply_to(&self.data_url);
        info!("Fetching records from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let error = ApiError::from_response(response).await;
            warn!("Records request failed: {}", error);
            return Err(error);
        }

        let body = response.text().await?;
        let records = serde_json::from_str::<DataResponse>(&body)?.into_records();

        debug!("Received {} records", records.len());
        Ok(records)
    }
}

#[async_trait::async_trait]
impl FinancialDataProvider for DataClient {
    async fn fetch_records(&self, query: &DataQuery) -> Result<RecordSet, ApiError> {
        DataClient::fetch_records(self, query).await
    }

    fn source_name(&self) -> String {
        self.data_url.clone()
    }
}
