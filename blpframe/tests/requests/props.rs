use blpframe::{FanOut, Params, Value, tick_extra_columns};
use blpframe_mock::{MockBehavior, fixtures};
use proptest::prelude::*;

use crate::helpers::{dt, dynamic_blp, tickers};

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_lowercase().chain(chars).collect())
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn extra_columns_match_true_include_keys(
        codes in any::<bool>(),
        entries in proptest::collection::vec(
            ("[A-Z][a-zA-Z]{0,8}", any::<bool>(), any::<bool>()),
            0..8,
        ),
    ) {
        let mut extra = Params::new();
        for (suffix, prefixed, flag) in &entries {
            let key = if *prefixed { format!("include{suffix}") } else { suffix.clone() };
            extra.insert(key, *flag);
        }

        let got = tick_extra_columns(codes, &extra);

        let mut expected: Vec<String> = Vec::new();
        if codes {
            expected.push("conditionCodes".to_string());
        }
        for (key, value) in extra.iter() {
            if *value == Value::Bool(true)
                && let Some(rest) = key.strip_prefix("include")
            {
                let name = lower_first(rest);
                if !name.is_empty() && !expected.contains(&name) {
                    expected.push(name);
                }
            }
        }
        prop_assert_eq!(got, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn same_messages_assemble_to_the_same_table(
        minutes in proptest::collection::vec(0i64..30, 1..20),
        split in 1usize..4,
    ) {
        tokio_test::block_on(async move {
            let (blp, ctrl) = dynamic_blp(FanOut::Sequential);
            let t0 = dt(2018, 1, 2, 14, 0, 0);
            let bars: Vec<_> = minutes
                .iter()
                .map(|m| fixtures::Bar::flat(t0 + chrono::Duration::minutes(*m), *m as f64, *m))
                .collect();
            let messages = bars.chunks(split).map(fixtures::bar_message).collect();
            ctrl.set_default_behavior(MockBehavior::Events(fixtures::respond_in_parts(messages)))
                .await;

            let end = t0 + chrono::Duration::minutes(30);
            let first = blp.intraday_bar("X", "TRADE", t0, end, 1, None).await.unwrap();
            let second = blp.intraday_bar("X", "TRADE", t0, end, 1, None).await.unwrap();

            assert_eq!(first, second);
            let mut distinct = minutes.clone();
            distinct.sort_unstable();
            distinct.dedup();
            assert_eq!(first.height(), distinct.len());
        });
    }

    #[test]
    fn fan_out_preserves_input_order(n in 1usize..5, concurrent in any::<bool>()) {
        tokio_test::block_on(async move {
            let mode = if concurrent {
                FanOut::Concurrent { limit: 2 }
            } else {
                FanOut::Sequential
            };
            let (blp, ctrl) = dynamic_blp(mode);
            let t0 = dt(2018, 1, 2, 14, 0, 0);
            let secs: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            for (i, sec) in secs.iter().enumerate() {
                // Later securities get earlier timestamps.
                let bars: Vec<_> = (0..2)
                    .map(|k| {
                        let offset = chrono::Duration::minutes(((n - i) * 2 + k) as i64);
                        fixtures::Bar::flat(t0 + offset, 1.0, 1)
                    })
                    .collect();
                ctrl.set_behavior(
                    sec,
                    MockBehavior::Events(fixtures::respond_in_parts(vec![
                        fixtures::bar_message(&bars),
                    ])),
                )
                .await;
            }

            let end = t0 + chrono::Duration::minutes(30);
            let table = blp.intraday_bar(secs.clone(), "TRADE", t0, end, 1, None).await.unwrap();

            let expected: Vec<String> = secs.iter().flat_map(|s| [s.clone(), s.clone()]).collect();
            assert_eq!(tickers(&table), expected);
            assert_eq!(ctrl.stops().await, n);
        });
    }
}
