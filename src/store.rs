/// The segment store: every operation is one read-modify-write of the whole
/// collection under a single storage key.

use crate::canonical::canonicalize;
use crate::error::{Result, SegmentError};
use crate::segment::{Segment, offset_ms, seconds_to_ms, validate_name};
use crate::storage::{KeyValueStore, SegmentCollection};

/// Key the extension has always stored its segments under
pub const STORAGE_KEY: &str = "copy-youtube-link";

/// Length of a new segment until its end is set explicitly
pub const DEFAULT_DURATION_SECS: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub default_duration_secs: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: STORAGE_KEY.to_string(),
            default_duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

pub struct SegmentStore<S: KeyValueStore> {
    backend: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> SegmentStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: S, config: StoreConfig) -> Self {
        SegmentStore { backend, config }
    }

    /// Read every stored segment
    ///
    /// A missing key is an empty list. So is a blob that does not decode; that
    /// case is logged and otherwise ignored.
    pub fn load(&self) -> Vec<Segment> {
        self.load_collection().segments
    }

    fn load_collection(&self) -> SegmentCollection {
        match self.read_collection() {
            Ok(collection) => collection,
            Err(e) => {
                log::warn!("Ignoring stored segments: {}", e);
                SegmentCollection::new()
            }
        }
    }

    /// Missing key is empty; an undecodable blob is `StorageRead`
    fn read_collection(&self) -> Result<SegmentCollection> {
        match self.backend.get(&self.config.storage_key) {
            Some(blob) => SegmentCollection::from_blob(&blob),
            None => Ok(SegmentCollection::new()),
        }
    }

    fn persist(&mut self, collection: &SegmentCollection) -> Result<()> {
        let blob = collection.to_blob()?;
        self.backend.set(&self.config.storage_key, &blob)?;
        log::debug!("Saved {} segments", collection.len());
        Ok(())
    }

    /// Start a segment at `start_seconds` with the configured default length
    pub fn append(&mut self, name: &str, url: &str, start_seconds: f64) -> Result<Segment> {
        let duration = self.config.default_duration_secs;
        self.append_with_duration(name, url, start_seconds, duration)
    }

    pub fn append_with_duration(
        &mut self,
        name: &str,
        url: &str,
        start_seconds: f64,
        duration_seconds: f64,
    ) -> Result<Segment> {
        let name = validate_name(name)?;
        let url = canonicalize(url)?;

        let start_ms = offset_ms(start_seconds)?;
        let end_ms = start_ms
            .checked_add(offset_ms(duration_seconds)?)
            .ok_or(SegmentError::InvalidTime(start_seconds + duration_seconds))?;
        let segment = Segment::new(name, url, start_ms, end_ms);

        let mut collection = self.load_collection();
        collection.push(segment.clone());
        self.persist(&collection)?;

        log::debug!("Added segment {:?} at {}ms", segment.name, segment.start_ms);
        Ok(segment)
    }

    /// Set the end of the most recent segment for this video
    ///
    /// The end is not checked against the start; an end before the start is
    /// stored as given.
    pub fn update_last_matching_end(&mut self, url: &str, end_seconds: f64) -> Result<Segment> {
        let url = canonicalize(url)?;
        let mut collection = self.load_collection();

        let updated = match collection.last_matching_mut(&url) {
            Some(segment) => {
                segment.end_ms = seconds_to_ms(end_seconds);
                segment.clone()
            }
            None => return Err(SegmentError::NotFound(url)),
        };

        self.persist(&collection)?;
        log::debug!("Set end of {:?} to {}ms", updated.name, updated.end_ms);
        Ok(updated)
    }

    /// Remove the segment at `index`; `false` when there is none
    pub fn delete_at(&mut self, index: usize) -> Result<bool> {
        let mut collection = self.load_collection();

        match collection.remove_at(index) {
            Some(removed) => {
                self.persist(&collection)?;
                log::debug!("Deleted segment {:?} at index {}", removed.name, index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.persist(&SegmentCollection::new())
    }

    /// Pretty-printed JSON of every stored segment
    ///
    /// Unlike `load`, a blob that does not decode is reported as
    /// `StorageRead` so there is nothing misleading to export.
    pub fn export_json(&self) -> Result<String> {
        self.read_collection()?.to_pretty_json()
    }
}
