//! Scoped session acquisition around exactly one request execution.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use blpframe_core::{BlpError, RequestKind, Service, Session, SessionFactory};
use futures::FutureExt;

/// Work performed on a started session with an opened service.
#[async_trait]
pub trait SessionBody: Send {
    type Output: Send;

    async fn run(self, session: &mut dyn Session, service: Service)
    -> Result<Self::Output, BlpError>;
}

/// Run `body` inside one session lifecycle.
///
/// The session is created, then starting it, opening the service and
/// running `body` all happen under the optional deadline. `stop` is then
/// called exactly once, whatever happened, and only afterwards is the error
/// returned or the panic resumed.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "blpframe::engine::lifecycle::with_session",
        skip(factory, body),
        fields(kind = %kind, service = service_name),
    )
)]
pub async fn with_session<B: SessionBody>(
    factory: &dyn SessionFactory,
    service_name: &str,
    deadline: Option<Duration>,
    kind: RequestKind,
    body: B,
) -> Result<B::Output, BlpError> {
    let mut session = factory.create()?;

    let outcome = AssertUnwindSafe(crate::core::with_request_deadline(
        deadline,
        kind,
        start_and_run(&mut *session, service_name, body),
    ))
    .catch_unwind()
    .await;

    session.stop().await;
    #[cfg(feature = "tracing")]
    tracing::debug!("session stopped");

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

async fn start_and_run<B: SessionBody>(
    session: &mut dyn Session,
    service_name: &str,
    body: B,
) -> Result<B::Output, BlpError> {
    if !session.start().await {
        #[cfg(feature = "tracing")]
        tracing::warn!("session failed to start");
        return Err(BlpError::SessionStart);
    }
    if !session.open_service(service_name).await {
        #[cfg(feature = "tracing")]
        tracing::warn!("service could not be opened");
        return Err(BlpError::service_unavailable(service_name));
    }
    #[cfg(feature = "tracing")]
    tracing::debug!("session started");

    let service = session.service(service_name);
    body.run(session, service).await
}
