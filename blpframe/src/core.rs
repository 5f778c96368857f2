use std::sync::Arc;
use std::time::Duration;

use blpframe_core::{
    BlpConfig, BlpError, DuplicateKeys, FanOut, RequestKind, RequestSpec, SessionFactory, Table,
};

use crate::engine::{ExecuteRequest, assembler, lifecycle, processor::ResponseProcessor};

/// Client that turns provider sessions into flat result tables.
pub struct Blp {
    pub(crate) factory: Arc<dyn SessionFactory>,
    pub(crate) cfg: BlpConfig,
}

/// Builder for constructing a `Blp` client with custom configuration.
pub struct BlpBuilder {
    factory: Option<Arc<dyn SessionFactory>>,
    cfg: BlpConfig,
}

impl Default for BlpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlpBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts without a session factory; register one via [`session_factory`].
    /// Defaults: `//blp/refdata`, 20ms poll wait, no request deadline,
    /// sequential fan-out, last-write-wins for repeated row keys.
    ///
    /// [`session_factory`]: Self::session_factory
    #[must_use]
    pub fn new() -> Self {
        Self {
            factory: None,
            cfg: BlpConfig::default(),
        }
    }

    /// Register the factory that creates one fresh session per request execution.
    #[must_use]
    pub fn session_factory(mut self, factory: Arc<dyn SessionFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Provider service opened on every session.
    #[must_use]
    pub fn service(mut self, name: impl Into<String>) -> Self {
        self.cfg.service = name.into();
        self
    }

    /// Bounded wait of each `next_event` poll.
    ///
    /// This is a liveness knob only: shorter waits react faster to a final
    /// event, longer waits poll less often.
    #[must_use]
    pub const fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.poll_timeout = timeout;
        self
    }

    /// Deadline for one session lifecycle (start, service open, send, poll loop).
    ///
    /// When exceeded the session is still stopped and `RequestTimeout` is
    /// returned. For fan-out calls the deadline applies per ticker.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Execution mode for per-ticker fan-out of bar and tick requests.
    #[must_use]
    pub const fn fan_out(mut self, mode: FanOut) -> Self {
        self.cfg.fan_out = mode;
        self
    }

    /// Policy for rows whose natural key repeats within one event loop.
    #[must_use]
    pub const fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.cfg.duplicate_keys = policy;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: BlpConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Blp` client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no session factory was registered, the poll
    /// wait is zero, the service name is blank, or a concurrent fan-out limit
    /// is zero.
    pub fn build(self) -> Result<Blp, BlpError> {
        let Some(factory) = self.factory else {
            return Err(BlpError::invalid_arg(
                "no session factory registered; add one via session_factory(...)",
            ));
        };
        if self.cfg.poll_timeout.is_zero() {
            return Err(BlpError::invalid_arg("poll_timeout must be positive"));
        }
        if self.cfg.service.trim().is_empty() {
            return Err(BlpError::invalid_arg("service name must not be blank"));
        }
        if matches!(self.cfg.fan_out, FanOut::Concurrent { limit: 0 }) {
            return Err(BlpError::invalid_arg(
                "concurrent fan-out limit must be at least 1",
            ));
        }
        Ok(Blp {
            factory,
            cfg: self.cfg,
        })
    }
}

/// Run `fut` under an optional deadline, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<Duration>,
    kind: RequestKind,
    fut: Fut,
) -> Result<T, BlpError>
where
    Fut: core::future::Future<Output = Result<T, BlpError>>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .unwrap_or_else(|_| Err(BlpError::request_timeout(kind.as_str()))),
        None => fut.await,
    }
}

impl Blp {
    /// Start building a new `Blp` client.
    ///
    /// ```rust,ignore
    /// let blp = blpframe::Blp::builder()
    ///     .session_factory(blpframe_mock::MockSession::factory())
    ///     .request_timeout(std::time::Duration::from_secs(30))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> BlpBuilder {
        BlpBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BlpConfig {
        &self.cfg
    }

    /// Execute one request spec in a single session lifecycle, without fan-out.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a malformed spec (checked before any session
    /// exists) and otherwise whatever the lifecycle reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "blpframe::core::execute",
            skip(self, spec),
            fields(kind = %spec.kind()),
        )
    )]
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Table, BlpError> {
        crate::router::util::validate_spec(spec)?;
        self.run_spec(spec).await
    }

    pub(crate) async fn run_spec(&self, spec: &RequestSpec) -> Result<Table, BlpError> {
        let processor = ResponseProcessor::for_spec(spec);
        let body = ExecuteRequest {
            spec,
            processor: &processor,
            poll_timeout: self.cfg.poll_timeout,
            duplicate_keys: self.cfg.duplicate_keys,
        };
        let store = lifecycle::with_session(
            self.factory.as_ref(),
            &self.cfg.service,
            self.cfg.request_timeout,
            spec.kind(),
            body,
        )
        .await?;
        assembler::assemble(store, spec, processor.extra_columns())
    }
}
