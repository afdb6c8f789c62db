//! Routing rule composition against the remote tree.
//!
//! # Data Flow
//! ```text
//! caller intent (proxy a.com → localhost:3000)
//!     → entities.rs (Route / RouteMatch / Handler / Upstream)
//!     → ports.rs (normalize loosely-typed port arguments)
//!     → manager.rs (upsert by @id, wildcard sub-tree appends)
//!     → transport (path + id addressed writes)
//! ```
//!
//! # Design Decisions
//! - Upsert is delete-then-append keyed by @id: last write wins, and a
//!   crash between the two leaves the route absent until retried
//! - Wildcard domains hold their sub-routes in a nested list appended to
//!   in place; concurrent appends are not serialized by this client
//! - Match conditions with an absent dimension match everything on it

pub mod entities;
pub mod manager;
pub mod ports;

pub use entities::{Handler, Route, RouteMatch, Upstream};
pub use manager::{reverse_proxy_route, sub_route, wildcard_route, RouteManager};
pub use ports::{PortSpec, PortValue};
