use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Default backend serving the `/data` endpoint
pub const DEFAULT_BASE_URL: &str = "https://rahul-financial-data-app.onrender.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One financial data point (an annual income statement line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// ISO date string, unique per record
    pub date: String,
    pub revenue: f64,
    pub net_income: f64,
    pub gross_profit: f64,
    pub eps: f64,
    pub operating_income: f64,
}

/// Records in the order the data source returned them
pub type RecordSet = Vec<Record>;

/// Response envelope of the `/data` endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DataResponse {
    #[serde(default)]
    pub data: Option<Vec<Record>>,
}

impl DataResponse {
    /// Records carried by the response, empty when the field is missing
    pub fn into_records(self) -> RecordSet {
        self.data.unwrap_or_default()
    }
}

/// The six user-editable filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    StartDate,
    EndDate,
    MinRevenue,
    MaxRevenue,
    MinNetIncome,
    MaxNetIncome,
}

impl FilterField {
    /// All fields in request and display order
    pub const ALL: [FilterField; 6] = [
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::MinRevenue,
        FilterField::MaxRevenue,
        FilterField::MinNetIncome,
        FilterField::MaxNetIncome,
    ];

    /// Query parameter name understood by the backend
    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::StartDate => "start_date",
            FilterField::EndDate => "end_date",
            FilterField::MinRevenue => "min_revenue",
            FilterField::MaxRevenue => "max_revenue",
            FilterField::MinNetIncome => "min_net_income",
            FilterField::MaxNetIncome => "max_net_income",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::StartDate => "Start Date",
            FilterField::EndDate => "End Date",
            FilterField::MinRevenue => "Min Revenue",
            FilterField::MaxRevenue => "Max Revenue",
            FilterField::MinNetIncome => "Min Net Income",
            FilterField::MaxNetIncome => "Max Net Income",
        }
    }

    /// Input hint shown in an empty filter box
    pub fn placeholder(self) -> &'static str {
        match self {
            FilterField::StartDate | FilterField::EndDate => "YYYY-MM-DD",
            _ => "number",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// User-specified constraints narrowing the requested record set.
///
/// A `None` field means "no filter". Empty strings are never stored, so an
/// empty input and an absent input compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_revenue: Option<String>,
    pub max_revenue: Option<String>,
    pub min_net_income: Option<String>,
    pub max_net_income: Option<String>,
}

impl FilterCriteria {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field from raw user input; blank input clears it, anything else
    /// is stored verbatim
    pub fn set(&mut self, field: FilterField, value: &str) {
        *self.slot_mut(field) = if value.trim().is_empty() {
            None
        } else {
            Some(value.to_string())
        };
    }

    /// Builder-style variant of [`FilterCriteria::set`]
    pub fn with(mut self, field: FilterField, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    fn slot(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
            FilterField::MinRevenue => &self.min_revenue,
            FilterField::MaxRevenue => &self.max_revenue,
            FilterField::MinNetIncome => &self.min_net_income,
            FilterField::MaxNetIncome => &self.max_net_income,
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
            FilterField::MinRevenue => &mut self.min_revenue,
            FilterField::MaxRevenue => &mut self.max_revenue,
            FilterField::MinNetIncome => &mut self.min_net_income,
            FilterField::MaxNetIncome => &mut self.max_net_income,
        }
    }
}

/// Sortable table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Revenue,
    NetIncome,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Revenue => "Revenue",
            SortField::NetIncome => "Net Income",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header arrow for the active column
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction; exactly one key at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortCriteria {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: flip direction on the active field, otherwise select the
    /// new field ascending
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("fin-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let mut config = Config::default();
        if let Ok(base_url) = std::env::var("FIN_DASHBOARD_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        if let Ok(timeout) = std::env::var("FIN_DASHBOARD_TIMEOUT_SECS") {
            let secs = timeout
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(timeout.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Replace the base URL, validating it and dropping any trailing slash
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{}: unsupported scheme {}",
                base_url,
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Full URL of the records endpoint
    pub fn data_url(&self) -> String {
        format!("{}/data", self.base_url)
    }
}
