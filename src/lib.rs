//! Admin configuration client for a remote reverse proxy.
//!
//! Models the server's hierarchical, path-addressable configuration tree on
//! the client side and composes routing rules, TLS issuance policy, and PKI
//! trust settings against it. The remote store is the single source of
//! truth; nothing is cached locally.
//!
//! # Architecture Overview
//!
//! ```text
//!     ProxyAdmin (facade)
//!         ├── routes::RouteManager ── reverse proxies, wildcard sub-trees,
//!         │                           @id-keyed upsert
//!         ├── tls::TlsManager ─────── issuer policies, PKI trust flag
//!         │        │
//!         │        └── provision::PathInitializer ── idempotent path
//!         │                                          materialization
//!         ├── tree ────────────────── TreeValue snapshots + pure nested
//!         │                           mutation (set_at_path)
//!         └── transport ───────────── RemoteTree trait + HTTP client
//! ```

pub mod error;
pub mod facade;
pub mod path;
pub mod provision;
pub mod routes;
pub mod tls;
pub mod transport;
pub mod tree;

pub use error::{Error, Result};
pub use facade::{ProxyAdmin, SetupOptions};
pub use path::TreePath;
pub use transport::{EndpointConfig, HttpRemoteTree, RemoteTree, WriteMode};
pub use tree::TreeValue;
