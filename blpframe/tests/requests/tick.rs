use blpframe::{FanOut, Params, Value, tick_extra_columns};
use blpframe_mock::{MockBehavior, fixtures};

use crate::helpers::{IBM, X, dt, dynamic_blp, fixture_blp};

#[tokio::test]
async fn tick_table_carries_requested_extra_columns() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let t0 = dt(2018, 1, 2, 14, 30, 0);
    let ticks = vec![
        fixtures::tick(
            t0,
            "TRADE",
            10.5,
            200,
            &[("conditionCodes", Value::from("R6")), ("brokerCodes", Value::from("MS"))],
        ),
        fixtures::tick(t0 + chrono::Duration::seconds(1), "BID", 10.4, 100, &[]),
    ];
    ctrl.set_behavior(
        X,
        MockBehavior::Events(fixtures::respond_in_parts(vec![fixtures::tick_message(ticks)])),
    )
    .await;

    let extra = Params::new()
        .with("includeBrokerCodes", true)
        .with("includeNonPlottableEvents", false);
    let table = blp
        .intraday_tick(X, ["TRADE", "BID"], t0, dt(2018, 1, 2, 15, 0, 0), true, Some(extra))
        .await
        .unwrap();

    assert_eq!(
        table.columns(),
        &["type", "value", "size", "conditionCodes", "brokerCodes"].map(String::from)
    );
    assert_eq!(table.height(), 2);
    assert_eq!(table.get(0, "type"), Some(&Value::from("TRADE")));
    assert_eq!(table.get(0, "conditionCodes"), Some(&Value::from("R6")));
    assert_eq!(table.get(1, "brokerCodes"), Some(&Value::Null));

    let req = &ctrl.requests().await[0];
    assert_eq!(req.operation(), "IntradayTickRequest");
    assert_eq!(req.values("eventTypes").len(), 2);
    assert_eq!(req.get("includeConditionCodes"), Some(&Value::Bool(true)));
    assert_eq!(req.get("includeBrokerCodes"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn tick_table_without_extras_has_three_columns() {
    let blp = fixture_blp();
    let table = blp
        .intraday_tick(
            IBM,
            "TRADE",
            dt(2018, 1, 2, 14, 30, 0),
            dt(2018, 1, 2, 14, 35, 0),
            false,
            None,
        )
        .await
        .unwrap();
    assert_eq!(table.columns(), &["type", "value", "size"].map(String::from));
    assert_eq!(table.height(), 10);
    assert_eq!(table.column_type("size"), Some("int"));
}

#[tokio::test]
async fn fixture_ticks_fill_derived_columns() {
    let blp = fixture_blp();
    let extra = Params::from([("includeExchangeCodes", true)]);
    let table = blp
        .intraday_tick(
            IBM,
            ["TRADE", "ASK"],
            dt(2018, 1, 2, 14, 30, 0),
            dt(2018, 1, 2, 14, 31, 0),
            true,
            Some(extra),
        )
        .await
        .unwrap();
    assert_eq!(
        table.columns(),
        &["type", "value", "size", "conditionCodes", "exchangeCodes"].map(String::from)
    );
    assert_eq!(table.get(1, "type"), Some(&Value::from("ASK")));
    assert_eq!(table.get(1, "exchangeCodes"), Some(&Value::from("exchangeCodes-1")));
}

#[test]
fn extra_columns_follow_insertion_order() {
    let extra = Params::new()
        .with("includeTradeTime", true)
        .with("maxDataPoints", 10_i64)
        .with("includeBicMicCodes", true)
        .with("includeSpreadPrice", Value::from("true"));
    assert_eq!(
        tick_extra_columns(false, &extra),
        vec!["tradeTime".to_string(), "bicMicCodes".to_string()]
    );
    assert_eq!(
        tick_extra_columns(true, &Params::new()),
        vec!["conditionCodes".to_string()]
    );
}
