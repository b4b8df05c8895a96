use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::models::{FilterCriteria, FilterField, Record, RecordSet, SortCriteria, SortField};
use crate::query::DataQuery;
use crate::sort::sort_records;

const MAX_LOG_MESSAGES: usize = 100;

/// Fetch cycle phase of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// A fetch for the current filters is in flight
    Loading,
    /// The latest fetch settled, successfully or not
    Ready,
}

/// Identifies one issued fetch; later tokens supersede earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A fetch the caller must execute and report back through
/// [`DashboardState::complete_fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub query: DataQuery,
}

/// What happened to a reported fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// Records replaced
    Applied { records: usize },
    /// Failure absorbed, previous records kept
    Failed,
    /// A newer request was issued meanwhile, result ignored
    Stale,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log message with timestamp
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// The view-model: filters, sort, fetched records and the loading cycle.
///
/// Owned and mutated by the UI loop only. The displayed rows are never stored;
/// [`DashboardState::sorted_records`] derives them on demand.
#[derive(Debug)]
pub struct DashboardState {
    phase: ViewPhase,
    loading: bool,
    records: RecordSet,
    filters: FilterCriteria,
    sort: SortCriteria,
    latest_token: Option<RequestToken>,
    next_token: u64,
    has_received: bool,
    last_updated: Option<DateTime<Utc>>,
    log_messages: Vec<LogMessage>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Startup state: no filters, sort by date ascending, loading
    pub fn new() -> Self {
        Self {
            phase: ViewPhase::Loading,
            loading: true,
            records: Vec::new(),
            filters: FilterCriteria::default(),
            sort: SortCriteria::default(),
            latest_token: None,
            next_token: 0,
            has_received: false,
            last_updated: None,
            log_messages: Vec::new(),
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn sort(&self) -> SortCriteria {
        self.sort
    }

    /// True once any fetch result, even an empty one, has been applied
    pub fn has_received(&self) -> bool {
        self.has_received
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn latest_token(&self) -> Option<RequestToken> {
        self.latest_token
    }

    /// Issue the startup fetch for the default filters
    pub fn begin_initial_fetch(&mut self) -> FetchTicket {
        self.issue_fetch()
    }

    /// Replace the filters. A fetch is issued only when the value differs
    /// from the current one.
    pub fn set_filters(&mut self, filters: FilterCriteria) -> Option<FetchTicket> {
        if filters == self.filters {
            debug!("Filters unchanged, no fetch issued");
            return None;
        }
        self.filters = filters;
        Some(self.issue_fetch())
    }

    /// Edit a single filter field from raw input
    pub fn set_filter(&mut self, field: FilterField, value: &str) -> Option<FetchTicket> {
        let filters = self.filters.clone().with(field, value);
        self.set_filters(filters)
    }

    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        self.set_filters(FilterCriteria::default())
    }

    /// Header click. Pure local recomputation: no fetch, no phase change.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
        debug!("Sort is now {:?}", self.sort);
    }

    /// Report the outcome of a fetch issued by this state
    pub fn complete_fetch(
        &mut self,
        token: RequestToken,
        result: Result<RecordSet, ApiError>,
    ) -> FetchDisposition {
        if self.latest_token != Some(token) {
            debug!("Discarding stale response for request #{}", token.value());
            return FetchDisposition::Stale;
        }

        self.loading = false;
        self.phase = ViewPhase::Ready;

        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.has_received = true;
                self.last_updated = Some(Utc::now());
                info!("Request #{} returned {} records", token.value(), count);
                self.add_log_message(LogLevel::Success, &format!("Loaded {} records", count));
                FetchDisposition::Applied { records: count }
            }
            Err(e) => {
                warn!("Request #{} failed ({}): {}", token.value(), e.kind(), e);
                self.add_log_message(LogLevel::Error, &format!("Fetch failed: {}", e));
                FetchDisposition::Failed
            }
        }
    }

    /// The displayed rows: the record set ordered by the current sort
    pub fn sorted_records(&self) -> Vec<Record> {
        sort_records(&self.records, self.sort)
    }

    fn issue_fetch(&mut self) -> FetchTicket {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest_token = Some(token);
        self.loading = true;
        self.phase = ViewPhase::Loading;

        let query = DataQuery::from_filters(&self.filters);
        let description = if query.is_empty() {
            "all records".to_string()
        } else {
            query.to_query_string()
        };
        debug!("Issuing request #{} for {}", token.value(), description);
        self.add_log_message(LogLevel::Info, &format!("Fetching {}", description));

        FetchTicket { token, query }
    }

    /// Add a log message
    pub fn add_log_message(&mut self, level: LogLevel, message: &str) {
        self.log_messages.push(LogMessage {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        });

        // Keep only the most recent messages
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    /// Get recent log messages (last N)
    pub fn get_recent_logs(&self, count: usize) -> &[LogMessage] {
        let start = self.log_messages.len().saturating_sub(count);
        &self.log_messages[start..]
    }

    /// Get the current status text for display
    pub fn get_status_text(&self) -> String {
        match self.phase {
            ViewPhase::Loading => "Loading...".to_string(),
            ViewPhase::Ready => match self.last_updated {
                Some(at) => format!(
                    "{} records • updated {}",
                    self.records.len(),
                    at.format("%H:%M:%S")
                ),
                None => "No data".to_string(),
            },
        }
    }
}
