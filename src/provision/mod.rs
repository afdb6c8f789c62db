//! Idempotent materialization of config tree paths.
//!
//! # Data Flow
//! ```text
//! caller path (e.g. /apps/tls/automation)
//!     → initializer.rs: probe each level shallow-to-deep
//!     → absent level: write an empty subtree
//!     → present level: skip (re-running issues no writes)
//! ```
//!
//! # Design Decisions
//! - Probe-then-write is not atomic; two concurrent callers can both probe
//!   before either writes. The store serializes individual requests only;
//!   the mitigation is retrying the whole operation, which the existence
//!   probes make safe
//! - A failed probe or write aborts the sequence with the underlying error;
//!   levels already created stay in place (no rollback)

pub mod initializer;

pub use initializer::PathInitializer;
