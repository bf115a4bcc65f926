/// Key-value storage backends and the serialized segment collection

use crate::error::{Result, SegmentError};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A synchronous, string-valued key-value store with `localStorage` semantics
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for tests and callers that keep segments off the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: HashMap::new(),
        }
    }

    /// A store holding a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The page's `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| SegmentError::StorageUnavailable("no window".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| SegmentError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SegmentError::StorageUnavailable("localStorage is disabled".to_string()))?;

        Ok(BrowserStorage { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("localStorage.getItem({}) failed: {:?}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| SegmentError::StorageWrite(format!("{:?}", e)))
    }
}

/// Ordered list of segments, exactly as stored: a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentCollection {
    pub segments: Vec<Segment>,
}

impl SegmentCollection {
    pub fn new() -> Self {
        SegmentCollection {
            segments: Vec::new(),
        }
    }

    /// Decode a stored blob
    pub fn from_blob(blob: &str) -> Result<Self> {
        serde_json::from_str(blob).map_err(|e| SegmentError::StorageRead(e.to_string()))
    }

    pub fn to_blob(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SegmentError::Serialize(e.to_string()))
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SegmentError::Serialize(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Most recently added segment with this canonical URL
    pub fn last_matching_mut(&mut self, url: &str) -> Option<&mut Segment> {
        self.segments.iter_mut().rev().find(|s| s.url == url)
    }

    /// Remove by position; later segments shift down by one
    pub fn remove_at(&mut self, index: usize) -> Option<Segment> {
        if index < self.segments.len() {
            Some(self.segments.remove(index))
        } else {
            None
        }
    }
}
