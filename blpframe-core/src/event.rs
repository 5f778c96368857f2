//! Events and messages delivered by a [`Session`](crate::Session).

use serde::{Deserialize, Serialize};

use crate::{BlpError, Element};

/// Classification of an event returned by `next_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventKind {
    /// A chunk of a response; more events follow.
    PartialResponse,
    /// The final chunk of a response.
    Response,
    /// Session state change (started, terminated, ...).
    SessionStatus,
    /// The bounded wait elapsed with nothing to deliver.
    Timeout,
    /// Service state change.
    ServiceStatus,
    /// Administrative notification.
    Admin,
    /// Request-level status notification.
    RequestStatus,
}

impl EventKind {
    /// Returns true for events whose messages carry response data.
    #[must_use]
    pub const fn is_response(self) -> bool {
        matches!(self, Self::PartialResponse | Self::Response)
    }
}

/// One typed message inside an [`Event`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    message_type: String,
    root: Element,
}

impl Message {
    /// Build a message of `message_type` with the given top-level elements.
    pub fn new(message_type: impl Into<String>, elements: Vec<Element>) -> Self {
        let message_type = message_type.into();
        Self {
            root: Element::sequence(message_type.clone(), elements),
            message_type,
        }
    }

    /// Message type, e.g. `HistoricalDataResponse` or `SessionTerminated`.
    #[must_use]
    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    /// Returns true if a top-level element with this name exists.
    #[must_use]
    pub fn has_element(&self, name: &str) -> bool {
        self.root.has_element(name)
    }

    /// Top-level element by name.
    ///
    /// # Errors
    /// Returns `Data` if the message has no such element.
    pub fn get_element(&self, name: &str) -> Result<&Element, BlpError> {
        self.root.get_element(name)
    }

    /// The message body as a sequence element.
    #[must_use]
    pub const fn as_element(&self) -> &Element {
        &self.root
    }
}

/// A batch of messages of one [`EventKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    kind: EventKind,
    messages: Vec<Message>,
}

impl Event {
    /// Build an event.
    #[must_use]
    pub const fn new(kind: EventKind, messages: Vec<Message>) -> Self {
        Self { kind, messages }
    }

    /// An empty `Timeout` event.
    #[must_use]
    pub const fn timeout() -> Self {
        Self::new(EventKind::Timeout, Vec::new())
    }

    /// Event classification.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Messages in delivery order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
