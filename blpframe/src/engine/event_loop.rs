//! Poll loop driving one session until its final response.

use std::time::Duration;

use blpframe_core::{BlpError, EventKind, ResponseError, Session, names};

use super::processor::{ResponseProcessor, response_error};
use super::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Polling,
    Done,
}

/// Why the loop reached [`LoopState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Response,
    SessionTerminated,
}

/// What the loop observed besides the rows it stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOutcome {
    pub exit: LoopExit,
    pub provider_errors: Vec<ResponseError>,
    pub data_error: Option<BlpError>,
    pub events: usize,
    pub messages: usize,
}

impl LoopOutcome {
    /// Fold recorded failures into one result.
    ///
    /// Provider envelopes take precedence over malformed-message errors,
    /// which take precedence over an early session termination.
    pub fn into_result(self) -> Result<(), BlpError> {
        if !self.provider_errors.is_empty() {
            return Err(BlpError::ProviderResponse(self.provider_errors));
        }
        if let Some(e) = self.data_error {
            return Err(e);
        }
        match self.exit {
            LoopExit::Response => Ok(()),
            LoopExit::SessionTerminated => Err(BlpError::SessionTerminated),
        }
    }
}

/// Poll `session` until a final response or a termination notice.
///
/// Every message of a partial or final response is handed to `processor`.
/// Messages carrying a `responseError` are recorded and not processed. A
/// failing message does not stop the loop; the first such error is kept.
pub async fn run(
    session: &mut dyn Session,
    processor: &ResponseProcessor,
    store: &mut RecordStore,
    poll_timeout: Duration,
) -> LoopOutcome {
    let mut state = LoopState::Polling;
    let mut exit = LoopExit::Response;
    let mut provider_errors = Vec::new();
    let mut data_error: Option<BlpError> = None;
    let mut events = 0usize;
    let mut messages = 0usize;

    while state == LoopState::Polling {
        let event = session.next_event(poll_timeout).await;
        match event.kind() {
            EventKind::PartialResponse | EventKind::Response => {
                events += 1;
                for msg in event.messages() {
                    messages += 1;
                    if let Some(err) = response_error(msg) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %err, "provider reported a response error");
                        provider_errors.push(err);
                        continue;
                    }
                    if let Err(e) = processor.process(msg, store, &mut provider_errors) {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            error = %e,
                            message_type = msg.message_type(),
                            "malformed response message"
                        );
                        data_error.get_or_insert(e);
                    }
                }
                if event.kind() == EventKind::Response {
                    state = LoopState::Done;
                }
            }
            EventKind::SessionStatus => {
                if event
                    .messages()
                    .iter()
                    .any(|m| m.message_type() == names::SESSION_TERMINATED)
                {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("session terminated before the final response");
                    exit = LoopExit::SessionTerminated;
                    state = LoopState::Done;
                }
            }
            #[allow(unused_variables)]
            other => {
                #[cfg(feature = "tracing")]
                tracing::trace!(kind = ?other, "ignoring event");
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        events,
        messages,
        rows = store.len(),
        provider_errors = provider_errors.len(),
        "event loop done"
    );

    LoopOutcome {
        exit,
        provider_errors,
        data_error,
        events,
        messages,
    }
}
