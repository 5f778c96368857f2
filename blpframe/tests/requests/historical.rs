use blpframe::{BlpError, FanOut, Value};
use blpframe_mock::{MockBehavior, fixtures};

use crate::helpers::{AAPL, IBM, date, dynamic_blp, fixture_blp, tickers};

#[tokio::test]
async fn two_trading_days_become_two_rows() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let msg = fixtures::historical_message(
        "A",
        &[
            (
                date(2018, 1, 2),
                vec![("PX_LAST", Value::from(10.0)), ("VOLUME", Value::from(500_i64))],
            ),
            (date(2018, 1, 3), vec![("PX_LAST", Value::from(11.0))]),
        ],
    );
    ctrl.set_behavior("A", MockBehavior::Events(fixtures::respond_in_parts(vec![msg])))
        .await;

    let table = blp
        .historical_data(
            "A",
            ["PX_LAST", "VOLUME"],
            date(2018, 1, 1),
            date(2018, 1, 3),
            None,
            None,
        )
        .await
        .unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.index_names(), &["date".to_string(), "ticker".to_string()]);
    assert_eq!(
        table.row_index(0).unwrap(),
        &[Value::Date(date(2018, 1, 2)), Value::from("A")]
    );
    assert_eq!(table.get(1, "PX_LAST"), Some(&Value::Float(11.0)));
    assert_eq!(table.get(1, "VOLUME"), Some(&Value::Null));

    let req = &ctrl.requests().await[0];
    assert_eq!(req.operation(), "HistoricalDataRequest");
    assert_eq!(req.get("startDate"), Some(&Value::from("20180101")));
    assert_eq!(req.get("endDate"), Some(&Value::from("20180103")));
}

#[tokio::test]
async fn securities_follow_request_order_regardless_of_arrival() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let rows = |px: f64| vec![(date(2018, 1, 2), vec![("PX_LAST", Value::from(px))])];
    let events = fixtures::respond_in_parts(vec![
        fixtures::historical_message("B", &rows(2.0)),
        fixtures::historical_message("A", &rows(1.0)),
    ]);
    ctrl.set_default_behavior(MockBehavior::Events(events)).await;

    let table = blp
        .historical_data(["A", "B"], "PX_LAST", date(2018, 1, 2), date(2018, 1, 2), None, None)
        .await
        .unwrap();

    assert_eq!(tickers(&table), vec!["A", "B"]);
    assert_eq!(table.get(0, "PX_LAST"), Some(&Value::Float(1.0)));
}

#[tokio::test]
async fn fixture_history_skips_weekends() {
    let blp = fixture_blp();
    let table = blp
        .historical_data(
            [AAPL, IBM],
            ["PX_LAST", "VOLUME"],
            date(2018, 1, 1),
            date(2018, 1, 7),
            None,
            None,
        )
        .await
        .unwrap();

    // Mon 1st through Fri 5th for each ticker.
    assert_eq!(table.height(), 10);
    assert_eq!(tickers(&table)[..5], vec![AAPL; 5]);
    assert_eq!(tickers(&table)[5..], vec![IBM; 5]);
    let dates: Vec<_> = table
        .index_level("date")
        .unwrap()
        .into_iter()
        .filter_map(Value::as_date)
        .collect();
    assert!(dates[..5].windows(2).all(|w| w[0] < w[1]));
    assert_eq!(table.column_type("VOLUME"), Some("int"));
}

#[tokio::test]
async fn historical_security_error_is_reported_with_the_ticker() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let events = fixtures::respond_in_parts(vec![
        fixtures::historical_message(
            "A",
            &[(date(2018, 1, 2), vec![("PX_LAST", Value::from(1.0))])],
        ),
        fixtures::historical_security_error("B", "BAD_SEC", "Unknown/Invalid security"),
    ]);
    ctrl.set_default_behavior(MockBehavior::Events(events)).await;

    let err = blp
        .historical_data(["A", "B"], "PX_LAST", date(2018, 1, 2), date(2018, 1, 2), None, None)
        .await
        .unwrap_err();
    match err {
        BlpError::ProviderResponse(errors) => {
            assert_eq!(errors[0].security.as_deref(), Some("B"));
        }
        other => panic!("expected a provider error, got {other:?}"),
    }
    assert_eq!(ctrl.stops().await, 1);
}
