use blpframe_core::{
    BlpError, Fields, HistoricalDataSpec, Params, RequestSpec, Securities, Table,
};
use chrono::NaiveDate;

use crate::Blp;

impl Blp {
    /// Fetch daily history for a set of securities in one request.
    ///
    /// Rows are keyed by `(date, ticker)`; each security's rows are in date
    /// order and securities follow the request order. Missing fields on a
    /// date are null.
    ///
    /// # Errors
    /// - `InvalidArg` for malformed securities or fields, blank parameter
    ///   keys, or `start > end`.
    /// - `ProviderResponse` if any security or the response failed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "blpframe::router::historical::historical_data",
            skip_all,
            fields(start = %start, end = %end),
        )
    )]
    pub async fn historical_data(
        &self,
        security: impl Into<Securities>,
        fields: impl Into<Fields>,
        start: NaiveDate,
        end: NaiveDate,
        overrides: Option<Params>,
        extra_params: Option<Params>,
    ) -> Result<Table, BlpError> {
        let spec = RequestSpec::HistoricalData(HistoricalDataSpec {
            securities: security.into(),
            fields: fields.into(),
            start,
            end,
            overrides: overrides.unwrap_or_default(),
            extra: extra_params.unwrap_or_default(),
        });
        self.execute(&spec).await
    }
}
