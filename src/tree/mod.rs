//! In-memory model of the remote configuration tree.
//!
//! # Data Flow
//! ```text
//! remote JSON document
//!     → value.rs (TreeValue: scalar | list | map, order preserved)
//!     → nested.rs (pure path-addressed mutation)
//!     → written back through the transport
//! ```
//!
//! # Design Decisions
//! - Values are an explicit recursive tagged variant, not a dynamic
//!   container; overwrite-on-type-mismatch is a checked branch
//! - Map insertion order is preserved for readability of the remote config
//! - Mutations are pure functions over snapshots; all I/O stays in callers

pub mod nested;
pub mod value;

pub use nested::set_at_path;
pub use value::{from_tree, to_tree, ConfigTree, TreeValue};
