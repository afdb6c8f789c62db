//! Path-addressed mutation of config tree snapshots.

use crate::path::TreePath;
use crate::tree::value::TreeValue;

/// Place `value` at `path` inside `root`, returning the updated root.
///
/// Intermediate levels that are missing are created as empty subtrees; an
/// intermediate level occupied by a scalar or list is replaced by an empty
/// subtree, discarding its contents. The final key is set to `value`
/// outright, never merged with a previous occupant. An empty path is a
/// no-op and returns `root` unchanged.
///
/// Pure function over an in-memory snapshot; callers own fetching the
/// snapshot and writing the result back.
pub fn set_at_path(root: TreeValue, path: &TreePath, value: TreeValue) -> TreeValue {
    let keys = path.keys();
    let Some((last, ancestors)) = keys.split_last() else {
        return root;
    };

    let mut root = root;
    let mut current = root.ensure_map();
    for key in ancestors {
        current = current
            .entry(key.clone())
            .or_insert_with(TreeValue::empty_map)
            .ensure_map();
    }
    current.insert(last.clone(), value);
    root
}
