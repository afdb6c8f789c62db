//! Config tree value model.

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::Result;

/// An ordered string-keyed mapping of config values.
pub type ConfigTree = IndexMap<String, TreeValue>;

/// A value held in the remote configuration tree.
///
/// The remote store is a JSON document; this type mirrors it as an explicit
/// scalar/list/map variant so tree mutations can branch on the container
/// kind. `Scalar` only ever holds null, booleans, numbers, or strings.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    /// A leaf value (null, bool, number, or string).
    Scalar(serde_json::Value),
    /// An ordered list of values.
    List(Vec<TreeValue>),
    /// A nested subtree, insertion order preserved.
    Map(ConfigTree),
}

impl TreeValue {
    /// A fresh empty subtree.
    pub fn empty_map() -> Self {
        TreeValue::Map(ConfigTree::new())
    }

    /// The null scalar.
    pub fn null() -> Self {
        TreeValue::Scalar(serde_json::Value::Null)
    }

    /// True when the value is a subtree.
    pub fn is_map(&self) -> bool {
        matches!(self, TreeValue::Map(_))
    }

    /// Borrow the contained subtree, if the value is one.
    pub fn as_map(&self) -> Option<&ConfigTree> {
        match self {
            TreeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key, when the value is a subtree holding it.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Borrow the contained subtree, replacing any non-map occupant with an
    /// empty one. Data held by a replaced scalar or list is discarded; this
    /// is the documented destructive branch of path materialization.
    pub fn ensure_map(&mut self) -> &mut ConfigTree {
        if !self.is_map() {
            *self = TreeValue::empty_map();
        }
        match self {
            TreeValue::Map(map) => map,
            // replaced with a map just above
            _ => unreachable!(),
        }
    }
}

impl From<TreeValue> for serde_json::Value {
    fn from(value: TreeValue) -> Self {
        match value {
            TreeValue::Scalar(scalar) => scalar,
            TreeValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            TreeValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                TreeValue::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => TreeValue::Map(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
            scalar => TreeValue::Scalar(scalar),
        }
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TreeValue::Scalar(scalar) => scalar.serialize(serializer),
            TreeValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TreeValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

struct TreeValueVisitor;

impl<'de> Visitor<'de> for TreeValueVisitor {
    type Value = TreeValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON-compatible config value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::Scalar(v.into()))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::null())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<TreeValue, E> {
        Ok(TreeValue::null())
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<TreeValue, D::Error> {
        deserializer.deserialize_any(TreeValueVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(
        self,
        mut seq: A,
    ) -> std::result::Result<TreeValue, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(TreeValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<TreeValue, A::Error> {
        let mut map = ConfigTree::new();
        while let Some((key, value)) = access.next_entry::<String, TreeValue>()? {
            map.insert(key, value);
        }
        Ok(TreeValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for TreeValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(TreeValueVisitor)
    }
}

/// Serialize an entity into a tree value for transmission.
pub fn to_tree<T: Serialize>(entity: &T) -> Result<TreeValue> {
    Ok(serde_json::to_value(entity)?.into())
}

/// Decode a tree snapshot back into a typed entity.
pub fn from_tree<T: DeserializeOwned>(value: TreeValue) -> Result<T> {
    Ok(serde_json::from_value(value.into())?)
}
