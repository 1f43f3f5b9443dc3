//! Snapshot deduplication
//!
//! Keyed by the snapshot file name, so two triggers that would produce the
//! same file with the same content only write it once.

use ahash::AHashMap;
use typelog_core::ContentHash;

/// Last written content hash per snapshot file name
#[derive(Debug, Default)]
pub struct DedupTable {
    entries: AHashMap<String, ContentHash>,
}

impl DedupTable {
    /// True unless `file_name` was last written with exactly `hash`
    pub fn is_fresh(&self, file_name: &str, hash: &ContentHash) -> bool {
        self.entries.get(file_name) != Some(hash)
    }

    /// Remember the content hash written under `file_name`
    pub fn record(&mut self, file_name: &str, hash: ContentHash) {
        self.entries.insert(file_name.to_string(), hash);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
