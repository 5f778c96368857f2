use blpframe_core::{BlpError, Fields, IntradayTickSpec, Params, RequestSpec, Securities, Table};
use chrono::{DateTime, Utc};

use crate::Blp;
use crate::router::util::{
    validate_fields, validate_params, validate_securities, validate_window,
};

impl Blp {
    /// Fetch raw ticks for one or more securities.
    ///
    /// Fans out per security like [`intraday_bar`](Self::intraday_bar). Rows
    /// are keyed by `(time, ticker)` with columns `[type, value, size]`
    /// followed by [`tick_extra_columns`](crate::tick_extra_columns) for the
    /// given flags. Extra columns a tick does not carry are null.
    ///
    /// # Errors
    /// Same as [`intraday_bar`](Self::intraday_bar), with empty or blank
    /// event types rejected up front.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "blpframe::router::tick::intraday_tick",
            skip_all,
            fields(condition_codes = include_condition_codes),
        )
    )]
    pub async fn intraday_tick(
        &self,
        security: impl Into<Securities>,
        event_types: impl Into<Fields>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        include_condition_codes: bool,
        extra_params: Option<Params>,
    ) -> Result<Table, BlpError> {
        let securities = security.into();
        let event_types = event_types.into();
        let extra = extra_params.unwrap_or_default();
        validate_securities(&securities)?;
        validate_fields(&event_types, "event type")?;
        validate_window(&start, &end)?;
        validate_params(&extra, "extra parameter")?;

        self.fan_out(&securities, |sec| {
            RequestSpec::IntradayTick(IntradayTickSpec {
                security: sec.to_string(),
                event_types: event_types.clone(),
                start,
                end,
                include_condition_codes,
                extra: extra.clone(),
            })
        })
        .await
    }
}
