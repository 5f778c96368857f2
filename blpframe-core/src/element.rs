//! Named, nested element tree shared by outbound requests and inbound messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BlpError, Value};

/// Payload of an [`Element`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ElementData {
    /// A single scalar.
    Value(Value),
    /// Named child elements (a struct-like record).
    Sequence(Vec<Element>),
    /// Repeated items; scalars or sequences.
    Array(Vec<Element>),
}

/// A node of a provider request or response.
///
/// Mirrors the provider's element API: typed getters for named children,
/// presence checks, scalar access, and iteration over repeated values.
/// Typed getters fail with [`BlpError::Data`] when a child is missing or has
/// the wrong type; callers that tolerate absence check [`has_element`]
/// first.
///
/// [`has_element`]: Element::has_element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    name: String,
    data: ElementData,
}

impl Element {
    /// A scalar element.
    pub fn value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            data: ElementData::Value(value.into()),
        }
    }

    /// A sequence element with the given children.
    pub fn sequence(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            data: ElementData::Sequence(children),
        }
    }

    /// An array element with the given items.
    pub fn array(name: impl Into<String>, items: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            data: ElementData::Array(items),
        }
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for array elements.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.data, ElementData::Array(_))
    }

    /// Child elements of a sequence; empty for scalars and arrays.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.data {
            ElementData::Sequence(children) => children,
            _ => &[],
        }
    }

    /// Items of an array; empty for scalars and sequences.
    #[must_use]
    pub fn values(&self) -> &[Self] {
        match &self.data {
            ElementData::Array(items) => items,
            _ => &[],
        }
    }

    /// Returns true if a sequence child with this name exists.
    #[must_use]
    pub fn has_element(&self, name: &str) -> bool {
        self.children().iter().any(|c| c.name == name)
    }

    /// Look up a sequence child by name.
    ///
    /// # Errors
    /// Returns `Data` if no such child exists.
    pub fn get_element(&self, name: &str) -> Result<&Self, BlpError> {
        self.children()
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| BlpError::Data(format!("element '{}' has no '{name}'", self.name)))
    }

    /// Scalar payload, if this is a scalar element.
    #[must_use]
    pub const fn get_value(&self) -> Option<&Value> {
        match &self.data {
            ElementData::Value(v) => Some(v),
            _ => None,
        }
    }

    fn scalar_child(&self, name: &str) -> Result<&Value, BlpError> {
        self.get_element(name)?.get_value().ok_or_else(|| {
            BlpError::Data(format!(
                "element '{}.{name}' is not a scalar",
                self.name
            ))
        })
    }

    fn type_mismatch(&self, name: &str, expected: &str, got: &Value) -> BlpError {
        BlpError::Data(format!(
            "element '{}.{name}' is {}, expected {expected}",
            self.name,
            got.type_name()
        ))
    }

    /// Child scalar as text.
    ///
    /// # Errors
    /// Returns `Data` if the child is missing or not a string.
    pub fn get_element_as_string(&self, name: &str) -> Result<String, BlpError> {
        let v = self.scalar_child(name)?;
        v.as_str()
            .map(ToString::to_string)
            .ok_or_else(|| self.type_mismatch(name, "string", v))
    }

    /// Child scalar as `f64`; integers are widened.
    ///
    /// # Errors
    /// Returns `Data` if the child is missing or not numeric.
    pub fn get_element_as_float(&self, name: &str) -> Result<f64, BlpError> {
        let v = self.scalar_child(name)?;
        v.as_f64().ok_or_else(|| self.type_mismatch(name, "float", v))
    }

    /// Child scalar as `i64`.
    ///
    /// # Errors
    /// Returns `Data` if the child is missing or not an integer.
    pub fn get_element_as_integer(&self, name: &str) -> Result<i64, BlpError> {
        let v = self.scalar_child(name)?;
        v.as_i64().ok_or_else(|| self.type_mismatch(name, "int", v))
    }

    /// Child scalar as a UTC timestamp.
    ///
    /// # Errors
    /// Returns `Data` if the child is missing or not a timestamp.
    pub fn get_element_as_datetime(&self, name: &str) -> Result<DateTime<Utc>, BlpError> {
        let v = self.scalar_child(name)?;
        v.as_datetime()
            .ok_or_else(|| self.type_mismatch(name, "datetime", v))
    }

    /// Set (or replace) a scalar child of a sequence.
    ///
    /// A scalar or array element is turned into an empty sequence first.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let children = self.children_mut();
        let replacement = Self::value(name.clone(), value);
        match children.iter_mut().find(|c| c.name == name) {
            Some(slot) => *slot = replacement,
            None => children.push(replacement),
        }
    }

    /// Append a scalar to the named array child, creating it if needed.
    pub fn append_value(&mut self, name: &str, value: impl Into<Value>) {
        let item = Self::value(name, value);
        self.array_child_mut(name).push(item);
    }

    /// Append an empty sequence to the named array child and return it.
    pub fn append_element(&mut self, name: &str) -> &mut Self {
        let items = self.array_child_mut(name);
        items.push(Self::sequence(name, Vec::new()));
        let last = items.len() - 1;
        &mut items[last]
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        if !matches!(self.data, ElementData::Sequence(_)) {
            self.data = ElementData::Sequence(Vec::new());
        }
        match &mut self.data {
            ElementData::Sequence(children) => children,
            _ => unreachable!("data was just set to a sequence"),
        }
    }

    fn array_child_mut(&mut self, name: &str) -> &mut Vec<Self> {
        let children = self.children_mut();
        let idx = match children.iter().position(|c| c.name == name) {
            Some(i) => i,
            None => {
                children.push(Self::array(name, Vec::new()));
                children.len() - 1
            }
        };
        let child = &mut children[idx];
        if !child.is_array() {
            child.data = ElementData::Array(Vec::new());
        }
        match &mut child.data {
            ElementData::Array(items) => items,
            _ => unreachable!("child was just set to an array"),
        }
    }
}
