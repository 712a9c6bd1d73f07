//! Port to label mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Built-in labels used whenever no usable mapping file exists.
const DEFAULT_LABELS: &[(u16, &str)] = &[
    (22, "SSH"),
    (80, "Apache (HTTP)"),
    (443, "Apache (HTTPS)"),
    (3306, "MySQL"),
    (9000, "Algum Serviço Docker (Exemplo)"),
];

/// User-defined labels keyed by port number as a decimal string.
///
/// Serialized as a flat JSON object, e.g. `{"22": "SSH", "80": "HTTP"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortMapping(BTreeMap<String, String>);

impl PortMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default mapping, including an entry naming the dashboard's own port.
    pub fn defaults(own_port: u16, own_name: &str) -> Self {
        let mut mapping: Self = DEFAULT_LABELS
            .iter()
            .map(|(port, label)| (port.to_string(), label.to_string()))
            .collect();
        mapping.insert(own_port, own_name);
        mapping
    }

    /// Look up the label for a port.
    pub fn get(&self, port: u16) -> Option<&str> {
        self.0.get(&port.to_string()).map(String::as_str)
    }

    /// Check whether a port has a label.
    pub fn contains(&self, port: u16) -> bool {
        self.0.contains_key(&port.to_string())
    }

    /// Set or replace the label for a port.
    pub fn insert(&mut self, port: u16, label: impl Into<String>) -> Option<String> {
        self.0.insert(port.to_string(), label.into())
    }

    /// Remove the label for a port, returning it if it existed.
    pub fn remove(&mut self, port: u16) -> Option<String> {
        self.0.remove(&port.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(port key, label)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PortMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse user input into a port number.
///
/// Surrounding whitespace is ignored; `"0080"` and `"80"` are the same port.
pub fn canonical_port(input: &str) -> Result<u16> {
    input
        .trim()
        .parse::<u16>()
        .map_err(|_| Error::InvalidPort(input.to_string()))
}
