use blpframe::{FanOut, Value};
use blpframe_mock::{MockBehavior, fixtures};

use crate::helpers::{AAPL, X, dt, dynamic_blp, fixture_blp, tickers};

#[tokio::test]
async fn three_bar_messages_become_three_rows_keyed_by_time_and_ticker() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    let bars: Vec<_> = (0..3)
        .map(|i| fixtures::Bar::flat(t0 + chrono::Duration::minutes(i), 10.0 + i as f64, 100))
        .collect();
    let events = fixtures::respond_in_parts(
        bars.iter()
            .map(|b| fixtures::bar_message(std::slice::from_ref(b)))
            .collect(),
    );
    ctrl.set_behavior(X, MockBehavior::Events(events)).await;

    let table = blp
        .intraday_bar(X, "BID", t0, dt(2018, 1, 2, 14, 33, 0), 1, None)
        .await
        .unwrap();

    assert_eq!(table.height(), 3);
    assert_eq!(table.index_names(), &["time".to_string(), "ticker".to_string()]);
    assert_eq!(
        table.columns(),
        &["open", "high", "low", "close", "volume", "numEvents", "value"]
            .map(String::from)
    );
    assert_eq!(tickers(&table), vec![X, X, X]);
    assert_eq!(
        table.row_index(2).unwrap()[0],
        Value::Datetime(t0 + chrono::Duration::minutes(2))
    );
    assert_eq!(table.get(1, "open"), Some(&Value::Float(11.0)));
    assert_eq!(table.get(0, "volume"), Some(&Value::Int(100)));
    assert_eq!(table.column_type("numEvents"), Some("int"));

    let requests = ctrl.requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.operation(), "IntradayBarRequest");
    assert_eq!(req.get("eventType"), Some(&Value::from("BID")));
    assert_eq!(req.get("interval"), Some(&Value::Int(1)));
    assert_eq!(ctrl.stops().await, 1);
}

#[tokio::test]
async fn extra_params_are_forwarded_verbatim() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(vec![])))
        .await;

    let extra = blpframe::Params::new()
        .with("gapFillInitialBar", true)
        .with("adjustmentSplit", false);
    let table = blp
        .intraday_bar(
            X,
            "TRADE",
            dt(2018, 1, 2, 14, 30, 0),
            dt(2018, 1, 2, 15, 0, 0),
            5,
            Some(extra),
        )
        .await
        .unwrap();

    assert!(table.is_empty());
    assert_eq!(table.width(), 7);
    let req = &ctrl.requests().await[0];
    assert_eq!(req.get("gapFillInitialBar"), Some(&Value::Bool(true)));
    assert_eq!(req.get("adjustmentSplit"), Some(&Value::Bool(false)));
}

#[tokio::test]
async fn fixture_session_produces_one_bar_per_interval() {
    let blp = fixture_blp();
    let table = blp
        .intraday_bar(
            AAPL,
            "TRADE",
            dt(2018, 1, 2, 14, 30, 0),
            dt(2018, 1, 2, 15, 30, 0),
            5,
            None,
        )
        .await
        .unwrap();

    assert_eq!(table.height(), 12);
    let times: Vec<_> = table
        .index_level("time")
        .unwrap()
        .into_iter()
        .filter_map(Value::as_datetime)
        .collect();
    assert!(times.windows(2).all(|w| w[1] - w[0] == chrono::Duration::minutes(5)));
}

#[tokio::test]
async fn repeated_bar_time_keeps_the_last_values() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    let t1 = t0 + chrono::Duration::minutes(1);
    let events = fixtures::respond_in_parts(vec![
        fixtures::bar_message(&[
            fixtures::Bar::flat(t0, 1.0, 10),
            fixtures::Bar::flat(t1, 2.0, 20),
        ]),
        fixtures::bar_message(&[fixtures::Bar::flat(t0, 3.0, 30)]),
    ]);
    ctrl.set_behavior(X, MockBehavior::Events(events)).await;

    let table = blp.intraday_bar(X, "TRADE", t0, t1, 1, None).await.unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.row_index(0).unwrap()[0], Value::Datetime(t0));
    assert_eq!(table.get(0, "close"), Some(&Value::Float(3.0)));
    assert_eq!(table.get(0, "volume"), Some(&Value::Int(30)));
    assert_eq!(table.get(1, "close"), Some(&Value::Float(2.0)));
}

#[tokio::test]
async fn keep_all_policy_keeps_repeated_bar_times() {
    let (factory, ctrl) = blpframe_mock::DynamicMockSession::new_with_controller();
    let blp = blpframe::Blp::builder()
        .session_factory(factory)
        .duplicate_keys(blpframe::DuplicateKeys::KeepAll)
        .build()
        .unwrap();
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    let events = fixtures::respond_in_parts(vec![
        fixtures::bar_message(&[fixtures::Bar::flat(t0, 1.0, 10)]),
        fixtures::bar_message(&[fixtures::Bar::flat(t0, 3.0, 30)]),
    ]);
    ctrl.set_behavior(X, MockBehavior::Events(events)).await;

    let table = blp.intraday_bar(X, "TRADE", t0, t0, 1, None).await.unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.get(0, "close"), Some(&Value::Float(1.0)));
    assert_eq!(table.get(1, "close"), Some(&Value::Float(3.0)));
}
