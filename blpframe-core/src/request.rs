//! Outbound service handles and request objects.

use serde::{Deserialize, Serialize};

use crate::{Element, RequestKind, Value, names};

/// Handle to an opened provider service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Service {
    name: String,
}

impl Service {
    /// Wrap a service name such as `//blp/refdata`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create an empty request for the given kind on this service.
    #[must_use]
    pub fn create_request(&self, kind: RequestKind) -> Request {
        Request {
            service: self.name.clone(),
            kind,
            root: Element::sequence(kind.operation(), Vec::new()),
        }
    }
}

/// A mutable request object, filled by the request builder and handed to
/// [`Session::send_request`](crate::Session::send_request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    service: String,
    kind: RequestKind,
    root: Element,
}

impl Request {
    /// Service the request was created on.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Request kind.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Provider operation name, e.g. `ReferenceDataRequest`.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.kind.operation()
    }

    /// Set a single-valued element, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.root.set(name, value);
    }

    /// Append a value to a repeated element.
    pub fn append(&mut self, name: &str, value: impl Into<Value>) {
        self.root.append_value(name, value);
    }

    /// Append one `{fieldId, value}` override entry.
    pub fn append_override(&mut self, field_id: &str, value: impl Into<Value>) {
        let entry = self.root.append_element(names::REQ_OVERRIDES);
        entry.set(names::REQ_FIELD_ID, field_id);
        entry.set(names::REQ_VALUE, value);
    }

    /// Top-level element of the request by name, if set.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.root.get_element(name).ok()
    }

    /// Scalar value of a single-valued element, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.element(name).and_then(Element::get_value)
    }

    /// Scalars of a repeated element, in append order.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<&Value> {
        self.element(name)
            .map(|e| e.values().iter().filter_map(Element::get_value).collect())
            .unwrap_or_default()
    }

    /// `(fieldId, value)` pairs of all override entries, in append order.
    #[must_use]
    pub fn overrides(&self) -> Vec<(&str, &Value)> {
        self.element(names::REQ_OVERRIDES)
            .map(|e| {
                e.values()
                    .iter()
                    .filter_map(|entry| {
                        let id = entry
                            .get_element(names::REQ_FIELD_ID)
                            .ok()?
                            .get_value()?
                            .as_str()?;
                        let value = entry.get_element(names::REQ_VALUE).ok()?.get_value()?;
                        Some((id, value))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The request body.
    #[must_use]
    pub const fn as_element(&self) -> &Element {
        &self.root
    }
}
