//! Routing rule wire entities.
//!
//! Shapes mirror the remote server's route JSON exactly: the stable
//! identifier travels as `@id`, and handlers carry their kind in an
//! explicit `handler` discriminator field.

use serde::{Deserialize, Serialize};

/// A single routing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Stable identifier, unique across the route namespace when present.
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Match conditions; a route with none matches every request.
    #[serde(rename = "match", default)]
    pub matchers: Vec<RouteMatch>,

    /// Ordered handler chain.
    #[serde(default)]
    pub handle: Vec<Handler>,

    /// When true, a match stops further route evaluation.
    #[serde(default)]
    pub terminal: bool,
}

/// Host/path match condition. An absent dimension matches everything on
/// that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouteMatch {
    /// Host patterns; `*.domain` matches any single-label subdomain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,

    /// Path patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
}

impl RouteMatch {
    /// Condition matching a single literal host.
    pub fn host(host: impl Into<String>) -> Self {
        Self {
            host: Some(vec![host.into()]),
            path: None,
        }
    }
}

/// One entry of a route's handler chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "handler")]
pub enum Handler {
    /// Forward matched requests to upstream targets in order.
    #[serde(rename = "reverse_proxy")]
    ReverseProxy {
        /// Dial targets; list order drives upstream selection order.
        upstreams: Vec<Upstream>,
    },

    /// Evaluate a nested route list, extensible independently of the
    /// parent.
    #[serde(rename = "subroute")]
    SubRoute {
        /// Nested routes, evaluated in order.
        routes: Vec<Route>,
    },
}

/// A reverse-proxy dial target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    /// `host:port` dial address.
    pub dial: String,
}

impl Upstream {
    /// Target built from a host and port pair.
    pub fn new(host: &str, port: &str) -> Self {
        Self {
            dial: format!("{}:{}", host, port),
        }
    }
}
