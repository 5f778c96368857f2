use std::collections::HashSet;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use blpframe_core::{BlpError, FanOut, Fields, Params, RequestSpec, Securities, Table};
use futures::{StreamExt, future};

use crate::Blp;

/// Reject an empty list, blank tickers, and repeated tickers.
///
/// # Errors
/// Returns `InvalidArg` describing the first problem found.
pub fn validate_securities(securities: &Securities) -> Result<(), BlpError> {
    if securities.is_empty() {
        return Err(BlpError::invalid_arg("at least one security is required"));
    }
    let mut seen = HashSet::new();
    for sec in securities.iter() {
        if sec.trim().is_empty() {
            return Err(BlpError::invalid_arg("security must not be blank"));
        }
        if !seen.insert(sec) {
            return Err(BlpError::invalid_arg(format!("duplicate security '{sec}'")));
        }
    }
    Ok(())
}

/// Reject an empty list and blank names; `what` names the argument.
///
/// # Errors
/// Returns `InvalidArg` describing the first problem found.
pub fn validate_fields(fields: &Fields, what: &str) -> Result<(), BlpError> {
    if fields.is_empty() {
        return Err(BlpError::invalid_arg(format!("at least one {what} is required")));
    }
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(BlpError::invalid_arg(format!("{what} must not be blank")));
    }
    Ok(())
}

/// Reject blank parameter keys; `what` names the argument.
///
/// # Errors
/// Returns `InvalidArg` if any key is blank.
pub fn validate_params(params: &Params, what: &str) -> Result<(), BlpError> {
    if params.keys().any(|k| k.trim().is_empty()) {
        return Err(BlpError::invalid_arg(format!("{what} keys must not be blank")));
    }
    Ok(())
}

/// Reject a window whose start is after its end.
///
/// # Errors
/// Returns `InvalidArg` if `start > end`.
pub fn validate_window<T>(start: &T, end: &T) -> Result<(), BlpError>
where
    T: PartialOrd + Display,
{
    if start > end {
        return Err(BlpError::invalid_arg(format!(
            "start {start} is after end {end}"
        )));
    }
    Ok(())
}

/// Validate every argument carried by a spec.
///
/// # Errors
/// Returns `InvalidArg` describing the first problem found.
pub fn validate_spec(spec: &RequestSpec) -> Result<(), BlpError> {
    match spec {
        RequestSpec::IntradayBar(s) => {
            validate_securities(&s.security.as_str().into())?;
            validate_fields(&s.event_type.as_str().into(), "event type")?;
            if s.interval == 0 {
                return Err(BlpError::invalid_arg("bar interval must be at least 1 minute"));
            }
            validate_window(&s.start, &s.end)?;
        }
        RequestSpec::IntradayTick(s) => {
            validate_securities(&s.security.as_str().into())?;
            validate_fields(&s.event_types, "event type")?;
            validate_window(&s.start, &s.end)?;
        }
        RequestSpec::ReferenceData(s) => {
            validate_securities(&s.securities)?;
            validate_fields(&s.fields, "field")?;
            validate_params(&s.overrides, "override")?;
        }
        RequestSpec::HistoricalData(s) => {
            validate_securities(&s.securities)?;
            validate_fields(&s.fields, "field")?;
            validate_params(&s.overrides, "override")?;
            validate_window(&s.start, &s.end)?;
        }
    }
    validate_params(spec.extra_params(), "extra parameter")
}

impl Blp {
    /// Run one single-security spec per ticker and concatenate in input order.
    ///
    /// A single ticker runs directly. With several, the first failure in
    /// input order aborts the batch and is reported as `Ticker`. In
    /// concurrent mode no new ticker is started once any lifecycle has
    /// failed; those already in flight are awaited so that each session is
    /// stopped.
    pub(crate) async fn fan_out<F>(
        &self,
        securities: &Securities,
        make: F,
    ) -> Result<Table, BlpError>
    where
        F: Fn(&str) -> RequestSpec,
    {
        if let [only] = securities.as_slice() {
            return self.run_spec(&make(only.as_str())).await;
        }

        let mut tables = Vec::with_capacity(securities.len());
        match self.cfg.fan_out {
            FanOut::Concurrent { limit } => {
                let failed = AtomicBool::new(false);
                let failed = &failed;
                let results: Vec<(&str, Result<Table, BlpError>)> =
                    futures::stream::iter(securities.iter())
                        .take_while(|_| future::ready(!failed.load(Ordering::SeqCst)))
                        .map(|sec| {
                            let spec = make(sec);
                            async move {
                                let res = self.run_spec(&spec).await;
                                if res.is_err() {
                                    failed.store(true, Ordering::SeqCst);
                                }
                                (sec, res)
                            }
                        })
                        .buffered(limit.max(1))
                        .collect()
                        .await;
                #[cfg(feature = "tracing")]
                if results.len() < securities.len() {
                    tracing::warn!(
                        started = results.len(),
                        requested = securities.len(),
                        "fan-out aborted after a failure"
                    );
                }
                for (sec, res) in results {
                    tables.push(res.map_err(|e| BlpError::ticker(sec, e))?);
                }
            }
            _ => {
                for sec in securities.iter() {
                    let table = self
                        .run_spec(&make(sec))
                        .await
                        .map_err(|e| BlpError::ticker(sec, e))?;
                    tables.push(table);
                }
            }
        }
        Table::concat(tables)
    }
}
