//! Collaborator contracts for the provider session.

use std::time::Duration;

use async_trait::async_trait;

use crate::{BlpError, Event, Request, Service};

/// A stateful provider session: unstarted, started, servicing, stopped.
///
/// A session is owned by exactly one request execution and is never reused.
/// Implementations wrap the real transport; tests use the scripted session
/// from `blpframe-mock`.
#[async_trait]
pub trait Session: Send {
    /// Start the session. Returns false if it could not be started.
    async fn start(&mut self) -> bool;

    /// Stop the session. Called exactly once per started lifecycle.
    async fn stop(&mut self);

    /// Open a named service. Returns false if it is unavailable.
    async fn open_service(&mut self, name: &str) -> bool;

    /// Handle for an opened service.
    fn service(&self, name: &str) -> Service {
        Service::new(name)
    }

    /// Deliver a request.
    ///
    /// # Errors
    /// Returns an error if the transport refused the request.
    async fn send_request(&mut self, request: Request) -> Result<(), BlpError>;

    /// Wait up to `timeout` for the next event.
    ///
    /// Returns an event of kind [`EventKind::Timeout`](crate::EventKind::Timeout)
    /// when nothing arrived in time.
    async fn next_event(&mut self, timeout: Duration) -> Event;
}

/// Creates a fresh, unstarted [`Session`] for each request execution.
pub trait SessionFactory: Send + Sync {
    /// Create a new session.
    ///
    /// # Errors
    /// Returns an error if the session object itself could not be created.
    fn create(&self) -> Result<Box<dyn Session>, BlpError>;
}

impl<F> SessionFactory for F
where
    F: Fn() -> Result<Box<dyn Session>, BlpError> + Send + Sync,
{
    fn create(&self) -> Result<Box<dyn Session>, BlpError> {
        self()
    }
}
