use blpframe::{BlpError, FanOut, Params, RequestKind, Value};
use blpframe_mock::{MockBehavior, fixtures};

use crate::helpers::{AAPL, IBM, MSFT, dynamic_blp, fixture_blp, tickers};

#[tokio::test]
async fn omitted_field_becomes_null() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let msg = fixtures::reference_message(vec![
        fixtures::reference_entry("A", &[("PX_LAST", Value::from(101.5))], &[]),
        fixtures::reference_entry("B", &[], &[]),
    ]);
    ctrl.set_behavior("A", MockBehavior::Events(fixtures::respond_in_parts(vec![msg])))
        .await;

    let table = blp
        .reference_data(["A", "B"], "PX_LAST", None, None)
        .await
        .unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.index_names(), &["ticker".to_string()]);
    assert_eq!(tickers(&table), vec!["A", "B"]);
    assert_eq!(table.get(0, "PX_LAST"), Some(&Value::Float(101.5)));
    assert_eq!(table.get(1, "PX_LAST"), Some(&Value::Null));
    assert_eq!(ctrl.sessions_created(), 1);
    assert_eq!(ctrl.stops().await, 1);
}

#[tokio::test]
async fn field_exceptions_and_partial_messages_fill_one_table() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    let events = fixtures::respond_in_parts(vec![
        fixtures::reference_message(vec![fixtures::reference_entry(
            "B",
            &[("NAME", Value::from("B CORP"))],
            &["PX_LAST"],
        )]),
        fixtures::reference_message(vec![fixtures::reference_entry(
            "A",
            &[("PX_LAST", Value::from(1.0)), ("NAME", Value::from("A CORP"))],
            &[],
        )]),
    ]);
    ctrl.set_default_behavior(MockBehavior::Events(events)).await;

    let table = blp
        .reference_data(vec!["A", "B"], vec!["PX_LAST", "NAME"], None, None)
        .await
        .unwrap();

    assert_eq!(tickers(&table), vec!["A", "B"]);
    assert_eq!(table.columns(), &["PX_LAST".to_string(), "NAME".to_string()]);
    assert_eq!(table.get(1, "PX_LAST"), Some(&Value::Null));
    assert_eq!(table.get(1, "NAME"), Some(&Value::from("B CORP")));
}

#[tokio::test]
async fn overrides_and_extra_params_are_sent_in_order() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(vec![])))
        .await;

    let overrides = Params::new()
        .with("EQY_FUND_CRNCY", "EUR")
        .with("BEST_FPERIOD_OVERRIDE", "1FY");
    let extra = Params::from([("returnEids", true)]);
    let table = blp
        .reference_data(AAPL, "BEST_EPS", Some(overrides), Some(extra))
        .await
        .unwrap();
    assert!(table.is_empty());

    let req = &ctrl.requests().await[0];
    assert_eq!(req.operation(), "ReferenceDataRequest");
    assert_eq!(
        req.overrides(),
        vec![
            ("EQY_FUND_CRNCY", &Value::from("EUR")),
            ("BEST_FPERIOD_OVERRIDE", &Value::from("1FY")),
        ]
    );
    assert_eq!(req.get("returnEids"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn security_error_fails_the_request_after_teardown() {
    let blp = fixture_blp();
    let err = blp
        .reference_data([AAPL, "NOPE Equity"], "PX_LAST", None, None)
        .await
        .unwrap_err();

    let errors = err.response_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].category, "BAD_SEC");
    assert_eq!(errors[0].security.as_deref(), Some("NOPE Equity"));
}

#[tokio::test]
async fn response_error_returns_no_rows() {
    let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
    ctrl.set_default_behavior(MockBehavior::Events(vec![fixtures::response(vec![
        fixtures::response_error(RequestKind::ReferenceData, "LIMIT", "Daily capacity reached"),
    ])]))
    .await;

    let res = blp.reference_data(AAPL, "PX_LAST", None, None).await;
    match res {
        Err(BlpError::ProviderResponse(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].category, "LIMIT");
            assert_eq!(errors[0].message, "Daily capacity reached");
        }
        other => panic!("expected a provider error, got {other:?}"),
    }
    assert_eq!(ctrl.stops().await, 1);
}

#[tokio::test]
async fn fixture_reference_rows_follow_request_order() {
    let blp = fixture_blp();
    let table = blp
        .reference_data([MSFT, AAPL, IBM], ["NAME", "CRNCY", "PX_LAST", "DVD_YLD"], None, None)
        .await
        .unwrap();
    assert_eq!(tickers(&table), vec![MSFT, AAPL, IBM]);
    assert_eq!(table.get(1, "NAME"), Some(&Value::from("APPLE INC")));
    assert_eq!(table.column_type("DVD_YLD"), Some("null"));
    assert_eq!(table.column_type("PX_LAST"), Some("float"));
}
