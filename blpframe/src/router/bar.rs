use blpframe_core::{BlpError, IntradayBarSpec, Params, RequestSpec, Securities, Table};
use chrono::{DateTime, Utc};

use crate::Blp;
use crate::router::util::{
    validate_fields, validate_params, validate_securities, validate_window,
};

impl Blp {
    /// Fetch intraday bars for one or more securities.
    ///
    /// Each security gets its own session lifecycle (the provider accepts a
    /// single security per bar request). The result is keyed by
    /// `(time, ticker)` with columns
    /// `[open, high, low, close, volume, numEvents, value]`, rows of each
    /// security in input order.
    ///
    /// # Errors
    /// - `InvalidArg` for an empty or repeated security list, a blank event
    ///   type, a zero interval or `start > end`, before any session exists.
    /// - `Ticker` wrapping the first failure when several securities were
    ///   requested; the bare failure for a single security.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "blpframe::router::bar::intraday_bar",
            skip_all,
            fields(event = %event, interval = interval_minutes),
        )
    )]
    pub async fn intraday_bar(
        &self,
        security: impl Into<Securities>,
        event: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval_minutes: u32,
        extra_params: Option<Params>,
    ) -> Result<Table, BlpError> {
        let securities = security.into();
        let extra = extra_params.unwrap_or_default();
        validate_securities(&securities)?;
        validate_fields(&event.into(), "event type")?;
        if interval_minutes == 0 {
            return Err(BlpError::invalid_arg(
                "bar interval must be at least 1 minute",
            ));
        }
        validate_window(&start, &end)?;
        validate_params(&extra, "extra parameter")?;

        self.fan_out(&securities, |sec| {
            RequestSpec::IntradayBar(IntradayBarSpec {
                security: sec.to_string(),
                event_type: event.to_string(),
                start,
                end,
                interval: interval_minutes,
                extra: extra.clone(),
            })
        })
        .await
    }
}
