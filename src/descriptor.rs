//! Schema-agnostic view of an SVD document.
//!
//! The XML is folded into a [`Value`] tree before any SVD semantics are
//! applied: an element with neither child elements nor attributes becomes a
//! [`Value::Scalar`] holding its trimmed text, anything else becomes a
//! [`Value::Map`] keyed by child name, and repeated children collapse into a
//! [`Value::List`]. Attributes share the map with children under `@`-prefixed
//! keys, so `derivedFrom="UART0"` is read back as `@derivedFrom`.
//!
//! A single child is stored bare rather than as a one-element list, which is
//! why every caller that iterates "the registers" or "the fields" must go
//! through [`Value::as_sequence`] instead of matching on the variant.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use xmltree::{Element, XMLNode};

/// One node of the folded document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Leaf text, trimmed. An empty element parses as `Scalar("")`.
    Scalar(String),
    /// Child elements keyed by name, plus `@`-prefixed attributes.
    Map(BTreeMap<String, Value>),
    /// Two or more same-named siblings, in document order.
    List(Vec<Value>),
}

impl Value {
    /// Parses an SVD document into a tree rooted at a single-entry map,
    /// `{ root element name: contents }`.
    pub fn parse(xml: &str) -> Result<Value> {
        let root = Element::parse(xml.as_bytes()).context("couldn't parse the SVD XML")?;
        let mut top = BTreeMap::new();
        let name = root.name.clone();
        top.insert(name, Value::from_element(&root));
        Ok(Value::Map(top))
    }

    fn from_element(element: &Element) -> Value {
        let children: Vec<&Element> = element
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .collect();

        if children.is_empty() && element.attributes.is_empty() {
            let text = element
                .get_text()
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            return Value::Scalar(text);
        }

        let mut map = BTreeMap::new();
        for (key, value) in &element.attributes {
            map.insert(format!("@{key}"), Value::Scalar(value.clone()));
        }

        // Group same-named siblings, preserving document order inside
        // each group.
        let mut groups: BTreeMap<&str, Vec<Value>> = BTreeMap::new();
        for child in children {
            groups
                .entry(child.name.as_str())
                .or_default()
                .push(Value::from_element(child));
        }
        for (name, mut values) in groups {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::List(values)
            };
            map.insert(name.to_string(), value);
        }
        Value::Map(map)
    }

    /// Looks up a key on a map node. `None` for scalars, lists, and absent
    /// keys alike.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Whether `key` is present on this node.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The scalar text of this node, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Views this node as a slice of entries: a list yields its items,
    /// anything else yields itself as a singleton. This is the one place
    /// the one-child/many-children XML ambiguity is resolved.
    pub fn as_sequence(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}
