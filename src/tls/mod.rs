//! TLS issuance policy and PKI trust configuration.
//!
//! # Data Flow
//! ```text
//! caller intent (internal CA, or ACME via DNS challenge)
//!     → entities.rs (AutomationPolicy / Issuer / PkiTrust)
//!     → manager.rs (first-writer-wins policy writes)
//!     → transport (path addressed writes)
//! ```
//!
//! # Design Decisions
//! - Issuer policies are never overwritten: an existing automation subtree
//!   means someone configured issuance already, and it wins
//! - PKI trust installation is opt-in; an unset flag issues no writes
//! - Certificate issuance itself belongs to the remote server; only its
//!   policy is modeled here

pub mod entities;
pub mod manager;

pub use entities::{AutomationPolicy, Issuer, PkiTrust};
pub use manager::{dns_token_from_env, TlsManager};
