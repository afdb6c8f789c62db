//! Transport boundary to the remote admin endpoint.
//!
//! # Data Flow
//! ```text
//! manager (routes, tls, provision)
//!     → remote.rs (RemoteTree trait: read/write/delete by path or id)
//!     → http.rs (reqwest against the admin endpoint)
//!     → remote store (single source of truth; nothing cached locally)
//! ```
//!
//! # Design Decisions
//! - Managers depend on the trait, never on reqwest; tests substitute an
//!   in-memory implementation
//! - Each call is one blocking (awaited) request/response exchange, so a
//!   caller's writes reach the store in program order
//! - Timeouts and cancellation live entirely in the HTTP client; the core
//!   propagates transport failures unchanged

pub mod http;
pub mod remote;

pub use http::{EndpointConfig, HttpRemoteTree};
pub use remote::{RemoteTree, WriteMode, APPEND_MARKER};
