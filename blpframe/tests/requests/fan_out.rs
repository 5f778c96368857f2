use blpframe::{BlpError, FanOut, RequestKind, Value};
use blpframe_mock::{DynamicMockController, MockBehavior, fixtures};
use chrono::{DateTime, Utc};

use crate::helpers::{dt, dynamic_blp, fixture_blp, tickers};

async fn script_bars(ctrl: &DynamicMockController, security: &str, times: &[DateTime<Utc>]) {
    let bars: Vec<_> = times
        .iter()
        .map(|t| fixtures::Bar::flat(*t, 1.0, 1))
        .collect();
    ctrl.set_behavior(
        security,
        MockBehavior::Events(fixtures::respond_in_parts(vec![fixtures::bar_message(&bars)])),
    )
    .await;
}

async fn ordering_case(mode: FanOut) {
    let (blp, ctrl) = dynamic_blp(mode);
    let t = |m| dt(2018, 1, 2, 14, m, 0);
    // B's bars are earlier than A's; input order still wins.
    script_bars(&ctrl, "A", &[t(40), t(41)]).await;
    script_bars(&ctrl, "B", &[t(30), t(31), t(32)]).await;

    let table = blp
        .intraday_bar(["A", "B"], "TRADE", t(30), t(45), 1, None)
        .await
        .unwrap();

    assert_eq!(tickers(&table), vec!["A", "A", "B", "B", "B"]);
    let times: Vec<_> = table
        .index_level("time")
        .unwrap()
        .into_iter()
        .filter_map(Value::as_datetime)
        .collect();
    assert_eq!(times, vec![t(40), t(41), t(30), t(31), t(32)]);
    assert_eq!(ctrl.sessions_created(), 2);
    assert_eq!(ctrl.stops().await, 2);
}

#[tokio::test]
async fn sequential_fan_out_keeps_input_order() {
    ordering_case(FanOut::Sequential).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_fan_out_keeps_input_order() {
    ordering_case(FanOut::Concurrent { limit: 2 }).await;
}

#[tokio::test]
async fn sequential_failure_aborts_the_batch_with_ticker_context() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    ctrl.set_behavior(
        "A",
        MockBehavior::Events(vec![fixtures::response(vec![fixtures::response_error(
            RequestKind::IntradayTick,
            "BAD_SEC",
            "Unknown/Invalid security",
        )])]),
    )
    .await;

    let err = blp
        .intraday_tick(
            ["A", "B"],
            "TRADE",
            dt(2018, 1, 2, 14, 30, 0),
            dt(2018, 1, 2, 15, 0, 0),
            false,
            None,
        )
        .await
        .unwrap_err();

    let (ticker, inner) = err.ticker_context();
    assert_eq!(ticker, Some("A"));
    assert!(matches!(inner, BlpError::ProviderResponse(_)));
    assert_eq!(ctrl.sessions_created(), 1);
    assert_eq!(ctrl.stops().await, 1);
}

#[tokio::test]
async fn concurrent_failure_waits_for_every_session_and_reports_input_order() {
    let (blp, ctrl) = dynamic_blp(FanOut::Concurrent { limit: 3 });
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    script_bars(&ctrl, "A", &[t0]).await;
    ctrl.set_behavior("B", MockBehavior::Fail(BlpError::transport("reset")))
        .await;
    ctrl.set_behavior("C", MockBehavior::Fail(BlpError::SessionTerminated))
        .await;

    let err = blp
        .intraday_bar(["A", "B", "C"], "TRADE", t0, t0, 1, None)
        .await
        .unwrap_err();

    assert_eq!(err, BlpError::ticker("B", BlpError::transport("reset")));
    assert_eq!(ctrl.sessions_created(), 3);
    assert_eq!(ctrl.stops().await, 3);
}

#[tokio::test]
async fn concurrent_failure_starts_no_further_tickers() {
    let (blp, ctrl) = dynamic_blp(FanOut::Concurrent { limit: 1 });
    ctrl.set_behavior("A", MockBehavior::Fail(BlpError::transport("reset")))
        .await;
    ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(vec![])))
        .await;
    let t0 = dt(2018, 1, 2, 14, 30, 0);

    let err = blp
        .intraday_bar(["A", "B", "C", "D"], "TRADE", t0, t0, 1, None)
        .await
        .unwrap_err();

    assert_eq!(err, BlpError::ticker("A", BlpError::transport("reset")));
    assert_eq!(ctrl.sessions_created(), 1);
    assert_eq!(ctrl.stops().await, 1);
}

#[tokio::test]
async fn concurrent_failure_drains_only_the_in_flight_window() {
    let (blp, ctrl) = dynamic_blp(FanOut::Concurrent { limit: 2 });
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    ctrl.set_behavior("A", MockBehavior::Fail(BlpError::transport("reset")))
        .await;
    script_bars(&ctrl, "B", &[t0]).await;
    ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(vec![])))
        .await;

    let err = blp
        .intraday_bar(["A", "B", "C", "D", "E"], "TRADE", t0, t0, 1, None)
        .await
        .unwrap_err();

    assert_eq!(err, BlpError::ticker("A", BlpError::transport("reset")));
    assert_eq!(ctrl.sessions_created(), 2);
    assert_eq!(ctrl.stops().await, 2);
    let mut named: Vec<_> = ctrl
        .requests()
        .await
        .iter()
        .map(blpframe_mock::requested_securities)
        .collect();
    named.sort();
    assert_eq!(named, vec![vec!["A"], vec!["B"]]);
}

#[tokio::test]
async fn single_security_error_is_not_wrapped() {
    let blp = fixture_blp();
    let err = blp
        .intraday_bar("FAIL", "TRADE", dt(2018, 1, 2, 14, 30, 0), dt(2018, 1, 2, 15, 0, 0), 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, BlpError::ProviderResponse(_)));
}

#[tokio::test]
async fn every_fanned_out_request_names_one_security() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(vec![])))
        .await;

    blp.intraday_bar(
        vec!["A".to_string(), "B".to_string(), "C".to_string()],
        "TRADE",
        dt(2018, 1, 2, 14, 30, 0),
        dt(2018, 1, 2, 15, 0, 0),
        1,
        None,
    )
    .await
    .unwrap();

    let named: Vec<_> = ctrl
        .requests()
        .await
        .iter()
        .map(blpframe_mock::requested_securities)
        .collect();
    assert_eq!(named, vec![vec!["A"], vec!["B"], vec!["C"]]);
}
