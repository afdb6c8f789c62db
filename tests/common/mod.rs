//! Shared test doubles for the admin tree.

use std::sync::Mutex;

use async_trait::async_trait;
use proxy_admin::{Error, RemoteTree, Result, TreePath, TreeValue, WriteMode};

/// In-memory [`RemoteTree`] with the same write/append/id semantics the
/// admin endpoint exposes, plus an operation log for asserting how many
/// exchanges a flow issued.
pub struct MemoryTree {
    state: Mutex<State>,
}

struct State {
    root: TreeValue,
    ops: Vec<String>,
}

impl MemoryTree {
    /// Fresh store: the root reads as null, like an unconfigured server.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_root(serde_json::Value::Null)
    }

    /// Store preset with the given document.
    pub fn with_root(root: serde_json::Value) -> Self {
        Self {
            state: Mutex::new(State {
                root: root.into(),
                ops: Vec::new(),
            }),
        }
    }

    /// Every operation issued so far, as `"<op> <address>"` lines.
    #[allow(dead_code)]
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    /// Number of mutating operations issued so far.
    #[allow(dead_code)]
    pub fn write_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| op.starts_with("write") || op.starts_with("delete"))
            .count()
    }

    /// Current full document.
    #[allow(dead_code)]
    pub fn snapshot(&self) -> TreeValue {
        self.state.lock().unwrap().root.clone()
    }
}

fn navigate<'a>(root: &'a TreeValue, keys: &[String]) -> Option<&'a TreeValue> {
    let mut current = root;
    for key in keys {
        current = match current {
            TreeValue::Map(map) => map.get(key)?,
            TreeValue::List(list) => list.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn navigate_mut<'a>(root: &'a mut TreeValue, keys: &[String]) -> Option<&'a mut TreeValue> {
    let mut current = root;
    for key in keys {
        current = match current {
            TreeValue::Map(map) => map.get_mut(key)?,
            TreeValue::List(list) => {
                let index = key.parse::<usize>().ok()?;
                list.get_mut(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

fn rejected(message: String) -> Error {
    Error::Transport {
        status: Some(400),
        message,
    }
}

fn apply_write(
    root: &mut TreeValue,
    keys: &[String],
    value: TreeValue,
    mode: WriteMode,
) -> Result<()> {
    let Some((last, ancestors)) = keys.split_last() else {
        *root = value;
        return Ok(());
    };

    if last == "..." {
        let target = navigate_mut(root, ancestors)
            .ok_or_else(|| Error::NotFound(format!("/{}", ancestors.join("/"))))?;
        return match (target, value) {
            (TreeValue::List(list), TreeValue::List(items)) => {
                list.extend(items);
                Ok(())
            }
            (TreeValue::List(list), item) => {
                list.push(item);
                Ok(())
            }
            _ => Err(rejected("append target is not a list".to_string())),
        };
    }

    let parent = navigate_mut(root, ancestors)
        .ok_or_else(|| Error::NotFound(format!("/{}", ancestors.join("/"))))?;
    match parent {
        TreeValue::Map(map) => match map.get_mut(last) {
            Some(TreeValue::List(list)) if mode == WriteMode::Insert => list.push(value),
            Some(slot) => *slot = value,
            None => {
                map.insert(last.clone(), value);
            }
        },
        TreeValue::List(list) => {
            let index: usize = last
                .parse()
                .map_err(|_| rejected(format!("non-numeric list index '{}'", last)))?;
            if index < list.len() {
                list[index] = value;
            } else if index == list.len() {
                list.push(value);
            } else {
                return Err(Error::NotFound(format!("/{}", keys.join("/"))));
            }
        }
        _ => return Err(rejected(format!("cannot write below a leaf at '{}'", last))),
    }
    Ok(())
}

fn apply_delete(root: &mut TreeValue, keys: &[String]) -> Result<()> {
    let missing = || Error::NotFound(format!("/{}", keys.join("/")));
    let Some((last, ancestors)) = keys.split_last() else {
        *root = TreeValue::null();
        return Ok(());
    };
    let parent = navigate_mut(root, ancestors).ok_or_else(missing)?;
    match parent {
        TreeValue::Map(map) => {
            map.shift_remove(last).ok_or_else(missing)?;
        }
        TreeValue::List(list) => {
            let index: usize = last.parse().map_err(|_| missing())?;
            if index >= list.len() {
                return Err(missing());
            }
            list.remove(index);
        }
        _ => return Err(missing()),
    }
    Ok(())
}

/// Key path of the entry whose `@id` equals `id`, depth-first.
fn find_id(root: &TreeValue, id: &str) -> Option<Vec<String>> {
    match root {
        TreeValue::Map(map) => {
            if let Some(TreeValue::Scalar(serde_json::Value::String(found))) = map.get("@id") {
                if found == id {
                    return Some(Vec::new());
                }
            }
            for (key, child) in map {
                if let Some(mut path) = find_id(child, id) {
                    path.insert(0, key.clone());
                    return Some(path);
                }
            }
            None
        }
        TreeValue::List(list) => {
            for (index, child) in list.iter().enumerate() {
                if let Some(mut path) = find_id(child, id) {
                    path.insert(0, index.to_string());
                    return Some(path);
                }
            }
            None
        }
        _ => None,
    }
}

#[async_trait]
impl RemoteTree for MemoryTree {
    async fn read(&self, path: &TreePath) -> Result<TreeValue> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("read {}", path));
        navigate(&state.root, path.keys())
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    async fn write(&self, path: &TreePath, value: TreeValue, mode: WriteMode) -> Result<()> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("write {}", path));
        apply_write(&mut state.root, path.keys(), value, mode)
    }

    async fn delete(&self, path: &TreePath) -> Result<()> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("delete {}", path));
        apply_delete(&mut state.root, path.keys())
    }

    async fn read_by_id(&self, id: &str) -> Result<TreeValue> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("read-id {}", id));
        let keys = find_id(&state.root, id).ok_or_else(|| Error::NotFound(id.to_string()))?;
        navigate(&state.root, &keys)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn write_by_id(
        &self,
        id: &str,
        suffix: &TreePath,
        value: TreeValue,
        mode: WriteMode,
    ) -> Result<()> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("write-id {}{}", id, suffix));
        let mut keys = find_id(&state.root, id).ok_or_else(|| Error::NotFound(id.to_string()))?;
        keys.extend(suffix.keys().iter().cloned());
        apply_write(&mut state.root, &keys, value, mode)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let state = &mut *self.state.lock().unwrap();
        state.ops.push(format!("delete-id {}", id));
        let keys = find_id(&state.root, id).ok_or_else(|| Error::NotFound(id.to_string()))?;
        apply_delete(&mut state.root, &keys)
    }
}

/// Wrapper injecting a transport failure on reads of one path; everything
/// else delegates to the inner store.
#[allow(dead_code)]
pub struct FlakyTree {
    pub inner: MemoryTree,
    pub fail_read_path: String,
}

#[async_trait]
impl RemoteTree for FlakyTree {
    async fn read(&self, path: &TreePath) -> Result<TreeValue> {
        if path.to_string() == self.fail_read_path {
            return Err(Error::Transport {
                status: Some(500),
                message: "injected failure".to_string(),
            });
        }
        self.inner.read(path).await
    }

    async fn write(&self, path: &TreePath, value: TreeValue, mode: WriteMode) -> Result<()> {
        self.inner.write(path, value, mode).await
    }

    async fn delete(&self, path: &TreePath) -> Result<()> {
        self.inner.delete(path).await
    }

    async fn read_by_id(&self, id: &str) -> Result<TreeValue> {
        self.inner.read_by_id(id).await
    }

    async fn write_by_id(
        &self,
        id: &str,
        suffix: &TreePath,
        value: TreeValue,
        mode: WriteMode,
    ) -> Result<()> {
        self.inner.write_by_id(id, suffix, value, mode).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.inner.delete_by_id(id).await
    }
}
