//! Level-by-level path creation against the remote tree.

use std::sync::Arc;

use crate::error::Result;
use crate::path::TreePath;
use crate::transport::{RemoteTree, WriteMode};
use crate::tree::{set_at_path, TreeValue};

/// Materializes every ancestor level of a path in the remote tree.
#[derive(Clone)]
pub struct PathInitializer {
    tree: Arc<dyn RemoteTree>,
}

impl PathInitializer {
    /// Build an initializer over the given transport.
    pub fn new(tree: Arc<dyn RemoteTree>) -> Self {
        Self { tree }
    }

    /// Ensure every level of `path` from `skip_levels` onward exists as a
    /// subtree, creating absent levels shallow-to-deep.
    ///
    /// Levels below `skip_levels` are assumed to exist already and are
    /// neither probed nor written; callers use this to leave well-known
    /// ancestors alone. Each level is probed before writing, so a second
    /// call with the same arguments issues no writes at all. The first
    /// failed probe or write aborts the sequence; levels created so far are
    /// left in place, and a retry picks up where the failure occurred.
    pub async fn ensure_path(&self, path: &TreePath, skip_levels: usize) -> Result<()> {
        for level in skip_levels..path.len() {
            let ancestor = path.prefix(level + 1);
            if self.tree.exists_path(&ancestor).await? {
                continue;
            }
            tracing::debug!(path = %ancestor, "creating config level");
            self.tree
                .write(&ancestor, TreeValue::empty_map(), WriteMode::Insert)
                .await?;
        }
        Ok(())
    }

    /// Ensure the configuration root is a subtree.
    ///
    /// A fresh store reports its root as absent or null; either is replaced
    /// with an empty subtree so deeper levels have somewhere to live.
    pub async fn ensure_root(&self) -> Result<()> {
        let root = TreePath::root();
        match self.tree.read(&root).await {
            Ok(TreeValue::Scalar(serde_json::Value::Null)) => {}
            Ok(_) => return Ok(()),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
        tracing::debug!("initializing empty config root");
        self.tree
            .write(&root, TreeValue::empty_map(), WriteMode::Insert)
            .await
    }

    /// Read the full tree, place `value` at `path`, and write the result
    /// back — the read-modify-write convenience for callers that want a
    /// single nested update without materializing each level remotely.
    pub async fn set_nested(&self, path: &TreePath, value: TreeValue) -> Result<()> {
        let root = TreePath::root();
        let snapshot = self.tree.read(&root).await?;
        let updated = set_at_path(snapshot, path, value);
        self.tree.write(&root, updated, WriteMode::Replace).await
    }
}
