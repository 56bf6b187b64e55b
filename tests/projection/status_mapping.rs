use crate::common::{self, StaticTransport};
use httpmock::Method::GET;
use mxfinance_rs::{CellResult, EntityKind, FieldLookup, MemoryStore, MxError, functions};

#[tokio::test]
async fn no_credential_short_circuits_before_any_request() {
    let transport = StaticTransport::new(200, r#"{"price":150}"#);
    let client = common::with_transport(transport.clone(), MemoryStore::new());

    let ticker = functions::ticker(&client, "AAPL", ["price"]).await;
    let isin = functions::isin(&client, "US0378331005", ["price"]).await;

    assert_eq!(ticker, CellResult::diagnostic("Login required"));
    assert_eq!(isin, CellResult::diagnostic("Login required"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn empty_stored_token_counts_as_logged_out() {
    let transport = StaticTransport::new(200, r#"{"price":150}"#);
    let client = common::with_transport(transport.clone(), MemoryStore::with_token(""));

    let result = functions::ticker(&client, "AAPL", ["price"]).await;

    assert_eq!(result, CellResult::diagnostic("Login required"));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn non_success_status_is_reported_with_its_code() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::api_path("ticker-data"));
        then.status(503).body("Service Unavailable");
    });

    let client = common::logged_in(&server);
    let result = functions::ticker(&client, "AAPL", ["price"]).await;

    mock.assert();
    assert_eq!(result, CellResult::diagnostic("API Error 503"));
}

#[tokio::test]
async fn error_status_body_is_not_parsed() {
    let transport = StaticTransport::new(404, r#"{"price":150}"#);
    let client = common::with_transport(transport.clone(), MemoryStore::with_token("tok"));

    let result = functions::isin(&client, "XX0000000000", ["price"]).await;

    assert_eq!(result, CellResult::diagnostic("API Error 404"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn status_error_keeps_token_out_of_the_url() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::api_path("ticker-data"));
        then.status(401);
    });

    let client = common::logged_in(&server);
    let err = FieldLookup::new(&client, EntityKind::Ticker, "AAPL")
        .fields(["price"])
        .fetch_record()
        .await
        .unwrap_err();

    mock.assert();
    match err {
        MxError::Status { status, url } => {
            assert_eq!(status, 401);
            assert!(url.contains("/ticker-data"));
            assert!(!url.contains(common::TOKEN), "token leaked into {url}");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_collapses_to_request_failed() {
    let client = common::unreachable();
    let result = functions::ticker(&client, "AAPL", ["price"]).await;
    assert_eq!(result, CellResult::diagnostic("Request Failed"));
}

#[tokio::test]
async fn malformed_body_collapses_to_request_failed() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::api_path("ticker-data"));
        then.status(200).body("<html>not json</html>");
    });

    let client = common::logged_in(&server);
    let result = functions::ticker(&client, "AAPL", ["price"]).await;

    mock.assert();
    assert_eq!(result, CellResult::diagnostic("Request Failed"));
}

#[tokio::test]
async fn null_body_collapses_to_request_failed() {
    let transport = StaticTransport::new(200, "null");
    let client = common::with_transport(transport.clone(), MemoryStore::with_token("tok"));

    let result = functions::ticker(&client, "AAPL", ["price"]).await;

    assert_eq!(result, CellResult::diagnostic("Request Failed"));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn exactly_one_get_is_issued() {
    let transport = StaticTransport::new(200, r#"{"price":150,"sector":"Tech"}"#);
    let client = common::with_transport(transport.clone(), MemoryStore::with_token("tok"));

    let _ = functions::ticker(&client, "AAPL", ["price", "sector"]).await;

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, mxfinance_rs::Method::Get);
    assert!(seen[0].bearer.is_none());
    assert!(seen[0].json.is_none());
}

#[tokio::test]
async fn failing_status_wins_over_a_truncated_body() {
    let client = common::broken_body(503).await;

    let ticker = functions::ticker(&client, "AAPL", ["price"]).await;
    let isin = functions::isin(&client, "US0378331005", ["price"]).await;

    assert_eq!(ticker, CellResult::diagnostic("API Error 503"));
    assert_eq!(isin, CellResult::diagnostic("API Error 503"));
}

#[tokio::test]
async fn truncated_success_body_collapses_to_request_failed() {
    let client = common::broken_body(200).await;

    let result = functions::ticker(&client, "AAPL", ["price"]).await;

    assert_eq!(result, CellResult::diagnostic("Request Failed"));
}
