//! Request execution: build, send, poll, process, assemble.
//!
//! One [`RequestSpec`] maps to one session lifecycle. The record store is
//! created inside the lifecycle body, filled by the event loop, and handed to
//! the assembler only after the session has been stopped.

pub mod assembler;
pub mod event_loop;
pub mod lifecycle;
pub mod processor;
pub mod request_builder;
pub mod store;

use std::time::Duration;

use async_trait::async_trait;
use blpframe_core::{BlpError, DuplicateKeys, RequestSpec, Service, Session};

use lifecycle::SessionBody;
use processor::ResponseProcessor;
use store::{HistoricalRows, KeyedRows, RecordStore};

/// Empty store matching the processor's request kind.
pub fn new_store(processor: &ResponseProcessor, policy: DuplicateKeys) -> RecordStore {
    match processor {
        ResponseProcessor::IntradayBar => RecordStore::Bars(KeyedRows::new(policy)),
        ResponseProcessor::IntradayTick { .. } => RecordStore::Ticks(KeyedRows::new(policy)),
        ResponseProcessor::ReferenceData { .. } => RecordStore::Reference(KeyedRows::new(policy)),
        ResponseProcessor::HistoricalData { .. } => {
            RecordStore::Historical(HistoricalRows::new(policy))
        }
    }
}

/// Lifecycle body for one request: build, send, then drive the event loop.
pub struct ExecuteRequest<'a> {
    pub spec: &'a RequestSpec,
    pub processor: &'a ResponseProcessor,
    pub poll_timeout: Duration,
    pub duplicate_keys: DuplicateKeys,
}

#[async_trait]
impl<'a> SessionBody for ExecuteRequest<'a> {
    type Output = RecordStore;

    async fn run(
        self,
        session: &mut dyn Session,
        service: Service,
    ) -> Result<RecordStore, BlpError> {
        let request = request_builder::build(self.spec, &service);
        session.send_request(request).await?;

        let mut store = new_store(self.processor, self.duplicate_keys);
        let outcome =
            event_loop::run(session, self.processor, &mut store, self.poll_timeout).await;
        outcome.into_result()?;

        let overwritten = store.overwritten();
        if overwritten > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                overwritten,
                kind = %self.spec.kind(),
                "repeated row keys replaced earlier rows"
            );
        }
        Ok(store)
    }
}
