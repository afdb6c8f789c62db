//! Normalization of loosely-typed port arguments.
//!
//! Sub-route callers supply ports as a single value or a mixed list, with
//! elements that may be strings or numbers (including floats when the input
//! came through a loosely-typed decode). Everything funnels into an ordered
//! list of string port identifiers before upstreams are built.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Port argument for sub-route composition.
///
/// `Many` is listed first: the untagged decode tries variants in order, and
/// `PortValue::Other` would otherwise swallow whole arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortSpec {
    /// An ordered, possibly mixed list of ports.
    Many(Vec<PortValue>),
    /// A single port.
    One(PortValue),
}

/// One port element, as loosely-typed input may carry it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    /// Already a string identifier.
    Str(String),
    /// A numeric port. Floats are accepted and their fractional part is
    /// truncated (`8080.7` becomes `"8080"`) — a deliberate policy for
    /// numbers that arrived through a float-only decode, not an accident.
    Num(serde_json::Number),
    /// Anything else; always rejected during normalization.
    Other(serde_json::Value),
}

impl PortValue {
    fn normalize(&self) -> Result<String> {
        match self {
            PortValue::Str(s) => Ok(s.clone()),
            PortValue::Num(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i.to_string())
                } else if let Some(f) = n.as_f64() {
                    Ok(format!("{}", f.trunc() as i64))
                } else {
                    Err(Error::UnsupportedPortType(n.to_string()))
                }
            }
            PortValue::Other(v) => Err(Error::UnsupportedPortType(v.to_string())),
        }
    }
}

impl PortSpec {
    /// Flatten into an ordered list of string port identifiers, rejecting
    /// any element that is neither a string nor a number.
    pub fn normalize(&self) -> Result<Vec<String>> {
        match self {
            PortSpec::One(value) => Ok(vec![value.normalize()?]),
            PortSpec::Many(values) => values.iter().map(PortValue::normalize).collect(),
        }
    }
}

impl From<u16> for PortSpec {
    fn from(port: u16) -> Self {
        PortSpec::One(PortValue::Num(port.into()))
    }
}

impl From<i64> for PortSpec {
    fn from(port: i64) -> Self {
        PortSpec::One(PortValue::Num(port.into()))
    }
}

impl From<&str> for PortSpec {
    fn from(port: &str) -> Self {
        PortSpec::One(PortValue::Str(port.to_string()))
    }
}

impl From<String> for PortSpec {
    fn from(port: String) -> Self {
        PortSpec::One(PortValue::Str(port))
    }
}

impl From<Vec<String>> for PortSpec {
    fn from(ports: Vec<String>) -> Self {
        PortSpec::Many(ports.into_iter().map(PortValue::Str).collect())
    }
}

impl From<Vec<&str>> for PortSpec {
    fn from(ports: Vec<&str>) -> Self {
        PortSpec::Many(
            ports
                .into_iter()
                .map(|p| PortValue::Str(p.to_string()))
                .collect(),
        )
    }
}

impl From<Vec<u16>> for PortSpec {
    fn from(ports: Vec<u16>) -> Self {
        PortSpec::Many(ports.into_iter().map(|p| PortValue::Num(p.into())).collect())
    }
}
