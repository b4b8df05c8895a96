//! Request builder: turns filter criteria into `/data` query parameters.

use url::form_urlencoded;

use crate::models::{FilterCriteria, FilterField};

/// Query parameters for one `/data` request.
///
/// Holds only the filters that are set, in a fixed order, so two equal
/// criteria always render the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataQuery {
    params: Vec<(&'static str, String)>,
}

impl DataQuery {
    /// Build the query for the given filters. Values are passed through
    /// untouched; inverted or non-numeric ranges are the server's business.
    pub fn from_filters(filters: &FilterCriteria) -> Self {
        let params = FilterField::ALL
            .iter()
            .filter_map(|field| {
                filters
                    .get(*field)
                    .filter(|value| !value.is_empty())
                    .map(|value| (field.param_name(), value.to_string()))
            })
            .collect();

        Self { params }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering, without leading `?`
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Append the query to an endpoint URL, leaving it bare when no filter is set
    pub fn apply_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, self.to_query_string())
        }
    }
}

impl From<&FilterCriteria> for DataQuery {
    fn from(filters: &FilterCriteria) -> Self {
        DataQuery::from_filters(filters)
    }
}
