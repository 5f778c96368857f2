use blpframe_core::{BlpError, Fields, Params, ReferenceDataSpec, RequestSpec, Securities, Table};

use crate::Blp;

impl Blp {
    /// Fetch current field values for a set of securities in one request.
    ///
    /// One row per security keyed by `ticker`, one column per requested
    /// field in request order. Fields the provider omits (or reports in
    /// `fieldExceptions`) are null cells, never errors.
    ///
    /// # Errors
    /// - `InvalidArg` for malformed securities, fields or parameter keys.
    /// - `ProviderResponse` if the response carried an error envelope or a
    ///   security error; raised after the session is stopped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "blpframe::router::reference::reference_data",
            skip_all,
        )
    )]
    pub async fn reference_data(
        &self,
        security: impl Into<Securities>,
        fields: impl Into<Fields>,
        overrides: Option<Params>,
        extra_params: Option<Params>,
    ) -> Result<Table, BlpError> {
        let spec = RequestSpec::ReferenceData(ReferenceDataSpec {
            securities: security.into(),
            fields: fields.into(),
            overrides: overrides.unwrap_or_default(),
            extra: extra_params.unwrap_or_default(),
        });
        self.execute(&spec).await
    }
}
