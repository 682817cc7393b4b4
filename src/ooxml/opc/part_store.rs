//! Concurrency-safe store of serialized package parts.
//!
//! The store maps part membernames (`word/header1.xml`, no leading slash) to
//! their serialized bytes. It is the persistence substrate every generated
//! part is written to; the archive step that zips it up lives elsewhere.
//!
//! Writers for distinct paths never interfere, and the last `put` for a given
//! path wins. There is no deletion.

use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

/// Thread-safe map from part path to bytes.
///
/// Share it behind an `Arc`; every method takes `&self`.
#[derive(Debug, Default)]
pub struct PartStore {
    parts: RwLock<HashMap<String, Bytes>>,
}

impl PartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`, replacing anything stored there before.
    pub fn put(&self, path: impl Into<String>, bytes: impl Into<Bytes>) {
        let path = path.into();
        let bytes = bytes.into();
        tracing::trace!(path = %path, len = bytes.len(), "part stored");
        self.parts.write().insert(path, bytes);
    }

    /// Get the bytes stored under `path`.
    ///
    /// The returned [`Bytes`] is a cheap reference-counted handle; later writes
    /// to the same path do not affect it.
    pub fn get(&self, path: &str) -> Option<Bytes> {
        self.parts.read().get(path).cloned()
    }

    /// Whether a part is stored under `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.parts.read().contains_key(path)
    }

    /// Count stored parts whose path starts with `prefix`.
    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.parts
            .read()
            .keys()
            .filter(|path| path.starts_with(prefix))
            .count()
    }

    /// Number of stored parts.
    pub fn len(&self) -> usize {
        self.parts.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.read().is_empty()
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.parts.read().keys().cloned().collect();
        paths.sort_unstable();
        paths
    }

    /// Consistent, ordered copy of every stored part.
    pub fn snapshot(&self) -> BTreeMap<String, Bytes> {
        self.parts
            .read()
            .iter()
            .map(|(path, bytes)| (path.clone(), bytes.clone()))
            .collect()
    }
}
