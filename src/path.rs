//! Slash-delimited addressing into the remote configuration tree.
//!
//! # Responsibilities
//! - Decode a path string into an ordered key sequence
//! - Encode a key sequence back into its canonical string form
//! - Provide prefix/join helpers for level-by-level provisioning
//!
//! # Design Decisions
//! - Paths are normalized: leading/trailing separators are trimmed
//! - Adjacent separators are rejected, not collapsed; a path with an empty
//!   segment is a caller bug and surfacing it keeps encode/decode exact
//! - The empty key sequence is the tree root and encodes to `/`

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const SEPARATOR: char = '/';

/// An ordered sequence of non-empty keys addressing a config subtree.
///
/// The root of the tree is the empty sequence and displays as `/`. For any
/// normalized path string `p`, `p.parse::<TreePath>()?.to_string() == p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreePath {
    keys: Vec<String>,
}

impl TreePath {
    /// The tree root (empty key sequence).
    pub fn root() -> Self {
        Self { keys: Vec::new() }
    }

    /// Build a path from pre-split keys, validating that none is empty.
    pub fn from_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        for key in &keys {
            if key.is_empty() || key.contains(SEPARATOR) {
                return Err(Error::InvalidPath(format!("/{}", keys.join("/"))));
            }
        }
        Ok(Self { keys })
    }

    /// Decode a path string.
    ///
    /// Leading and trailing separators are trimmed; an empty or
    /// separator-only input decodes to the root. An empty segment between
    /// separators (`/a//b`) is rejected with [`Error::InvalidPath`].
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim_matches(SEPARATOR);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let keys: Vec<String> = trimmed.split(SEPARATOR).map(str::to_string).collect();
        if keys.iter().any(String::is_empty) {
            return Err(Error::InvalidPath(path.to_string()));
        }
        Ok(Self { keys })
    }

    /// The decoded key sequence.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of levels below the root.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True for the tree root.
    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    /// True for the tree root.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A new path extended by one key.
    pub fn join(&self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() || key.contains(SEPARATOR) {
            return Err(Error::InvalidPath(format!("{}/{}", self, key)));
        }
        let mut keys = self.keys.clone();
        keys.push(key);
        Ok(Self { keys })
    }

    /// The sub-path holding the first `n` keys (`n` clamped to the length).
    pub fn prefix(&self, n: usize) -> Self {
        Self {
            keys: self.keys[..n.min(self.keys.len())].to_vec(),
        }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return f.write_str("/");
        }
        for key in &self.keys {
            write!(f, "/{}", key)?;
        }
        Ok(())
    }
}

impl FromStr for TreePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
