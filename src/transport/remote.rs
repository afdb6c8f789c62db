//! Remote tree access interface.

use async_trait::async_trait;

use crate::error::Result;
use crate::path::TreePath;
use crate::tree::TreeValue;

/// How a write is applied at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace whatever the target holds (PUT semantics).
    Replace,
    /// Insert into the target (POST semantics); appends when the target is
    /// a list position.
    Insert,
}

/// Read/write/delete access to the remote configuration store, addressed
/// either by path or by the stable `@id` of an entry.
///
/// Implementations perform one request/response exchange per call and
/// report absence as [`Error::NotFound`](crate::Error::NotFound). The store
/// itself is the single source of truth; implementations keep no cache.
#[async_trait]
pub trait RemoteTree: Send + Sync {
    /// Fetch the subtree at `path`.
    async fn read(&self, path: &TreePath) -> Result<TreeValue>;

    /// Write `value` at `path`.
    async fn write(&self, path: &TreePath, value: TreeValue, mode: WriteMode) -> Result<()>;

    /// Remove the subtree at `path`.
    async fn delete(&self, path: &TreePath) -> Result<()>;

    /// Fetch the entry carrying the given `@id`.
    async fn read_by_id(&self, id: &str) -> Result<TreeValue>;

    /// Write `value` at a sub-path beneath the entry carrying `id`.
    ///
    /// The root suffix addresses the entry itself. A suffix whose final key
    /// is `...` targets "end of the list at the enclosing path": with
    /// [`WriteMode::Insert`], `value` must be a list and its elements are
    /// appended in order.
    async fn write_by_id(
        &self,
        id: &str,
        suffix: &TreePath,
        value: TreeValue,
        mode: WriteMode,
    ) -> Result<()>;

    /// Remove the entry carrying the given `@id`.
    async fn delete_by_id(&self, id: &str) -> Result<()>;

    /// Existence probe: a successful read means the path exists.
    ///
    /// Only `NotFound` maps to `Ok(false)`; any other failure is surfaced
    /// unchanged, so an unreachable store is never mistaken for an absent
    /// entry.
    async fn exists_path(&self, path: &TreePath) -> Result<bool> {
        match self.read(path).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Existence probe by `@id`, with the same failure contract as
    /// [`exists_path`](Self::exists_path).
    async fn exists_id(&self, id: &str) -> Result<bool> {
        match self.read_by_id(id).await {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Marker key meaning "append at the end of the list at this path".
pub const APPEND_MARKER: &str = "...";
