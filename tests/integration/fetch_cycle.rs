//! End-to-end fetch cycle: view-model, HTTP client and a mock backend

use assert_matches::assert_matches;
use crossterm::event::KeyCode;
use fin_dashboard::api::DataClient;
use fin_dashboard::error::ApiError;
use fin_dashboard::models::{Config, FilterField};
use fin_dashboard::query::DataQuery;
use fin_dashboard::ui::{DashboardApp, DashboardState, FetchDisposition, ViewPhase};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{logging, test_data};

fn client_for(server: &MockServer) -> DataClient {
    let config = Config::default().with_base_url(&server.uri()).unwrap();
    DataClient::new(&config).unwrap()
}

/// Client pointed at a local port nothing listens on
fn unreachable_client() -> DataClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let config = Config::default()
        .with_base_url(&format!("http://127.0.0.1:{}", port))
        .unwrap();
    DataClient::new(&config).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_filter_change_round_trip() {
    let server = MockServer::start().await;
    let expected = vec![
        test_data::create_test_record("2023-01-01", 500.0, 120.0),
        test_data::create_test_record("2022-01-01", 1500.0, 300.0),
    ];
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("min_revenue", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_data::data_body(&expected)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = DashboardState::new();

    logging::log_test_step("Setting min revenue filter");
    let ticket = state.set_filter(FilterField::MinRevenue, "1000").expect("filter changed");
    assert_eq!(ticket.query.to_query_string(), "min_revenue=1000");
    assert!(state.is_loading());

    let result = client.fetch_records(&ticket.query).await;
    let disposition = state.complete_fetch(ticket.token, result);

    assert_eq!(disposition, FetchDisposition::Applied { records: 2 });
    assert_eq!(state.records(), expected.as_slice());
    assert_eq!(state.phase(), ViewPhase::Ready);
}

#[test_log::test(tokio::test)]
async fn test_failures_keep_previous_records() {
    let server = MockServer::start().await;
    let initial = vec![test_data::create_test_record("2021-01-01", 10.0, 1.0)];
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("end_date", "bad"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid query parameter value"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("end_date", "garbled"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\": [1, 2"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_data::data_body(&initial)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = DashboardState::new();

    let ticket = state.begin_initial_fetch();
    let result = client.fetch_records(&ticket.query).await;
    state.complete_fetch(ticket.token, result);
    assert_eq!(state.records(), initial.as_slice());

    for value in ["bad", "garbled"] {
        logging::log_test_step(&format!("Failing fetch with end_date={}", value));
        let ticket = state.set_filter(FilterField::EndDate, value).expect("filter changed");
        assert!(state.is_loading());

        let result = client.fetch_records(&ticket.query).await;
        assert!(result.is_err());
        assert_eq!(state.complete_fetch(ticket.token, result), FetchDisposition::Failed);

        assert!(!state.is_loading());
        assert_eq!(state.records(), initial.as_slice());
    }
}

#[test_log::test(tokio::test)]
async fn test_network_failure_keeps_previous_records() {
    let server = MockServer::start().await;
    let initial = vec![
        test_data::create_test_record("2022-09-24", 394_328.0, 99_803.0),
        test_data::create_test_record("2021-09-25", 365_817.0, 94_680.0),
    ];
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_data::data_body(&initial)))
        .expect(1)
        .mount(&server)
        .await;

    let mut state = DashboardState::new();
    let ticket = state.begin_initial_fetch();
    let result = client_for(&server).fetch_records(&ticket.query).await;
    assert_eq!(state.complete_fetch(ticket.token, result), FetchDisposition::Applied { records: 2 });

    logging::log_test_step("Filter change against an unreachable backend");
    let ticket = state.set_filter(FilterField::StartDate, "2022-01-01").expect("filter changed");
    assert!(state.is_loading());
    assert_eq!(state.phase(), ViewPhase::Loading);

    let result = unreachable_client().fetch_records(&ticket.query).await;
    assert_matches!(result, Err(ApiError::Network(_)));
    assert_eq!(state.complete_fetch(ticket.token, result), FetchDisposition::Failed);

    assert!(!state.is_loading());
    assert_eq!(state.phase(), ViewPhase::Ready);
    assert_eq!(state.records(), initial.as_slice());
    assert_eq!(state.filters().get(FilterField::StartDate), Some("2022-01-01"));
}

#[test_log::test(tokio::test)]
async fn test_stale_response_does_not_overwrite_newer() {
    let server = MockServer::start().await;
    let filtered = vec![test_data::create_test_record("2024-09-28", 391_035.0, 93_736.0)];
    let unfiltered = test_data::generate_records(7, 5);

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("min_revenue", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(test_data::data_body(&filtered)))
        .expect(1)
        .mount(&server)
        .await;
    // The startup request is slow and settles after the filtered one
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(test_data::data_body(&unfiltered))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = DashboardApp::new(Arc::new(client_for(&server)));
    app.start();

    for key in [KeyCode::Tab, KeyCode::Tab, KeyCode::Enter, KeyCode::Char('1'), KeyCode::Enter] {
        app.handle_key_event(key).unwrap();
    }
    assert!(app.state.is_loading());

    for _ in 0..2 {
        let event = app.next_event().await.expect("fetch completion");
        app.handle_event(event).unwrap();
    }

    assert_eq!(app.state.records(), filtered.as_slice());
    assert_eq!(app.state.phase(), ViewPhase::Ready);
    assert!(!app.state.is_loading());
}

#[test_log::test(tokio::test)]
async fn test_missing_data_field_yields_empty_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch_records(&DataQuery::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}
