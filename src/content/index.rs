//! In-memory content index loaded from the CMS snapshot.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::content::model::ContentItem;

/// Errors that can occur while loading the content snapshot.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Snapshot file could not be read.
    #[error("failed to read content index {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Snapshot file is not a valid JSON array of content items.
    #[error("failed to parse content index {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// Two items share an id; identity must be stable and unique.
    #[error("duplicate content id {id} in index")]
    DuplicateId { id: u64 },
}

/// Immutable index over the content snapshot.
///
/// Items are held sorted by date descending so listing entry points and
/// backfill passes read in recency order.
#[derive(Debug)]
pub struct ContentIndex {
    items: Vec<ContentItem>,
    by_id: HashMap<u64, usize>,
}

impl ContentIndex {
    /// Load and validate the snapshot file.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: display.clone(),
            source,
        })?;
        let items: Vec<ContentItem> =
            serde_json::from_str(&raw).map_err(|source| IndexError::Parse {
                path: display,
                source,
            })?;
        Self::from_items(items)
    }

    /// Build an index from already-deserialized items.
    pub fn from_items(mut items: Vec<ContentItem>) -> Result<Self, IndexError> {
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        let mut by_id = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if by_id.insert(item.id, position).is_some() {
                return Err(IndexError::DuplicateId { id: item.id });
            }
        }
        Ok(Self { items, by_id })
    }

    /// Look up one item by id.
    pub fn get(&self, id: u64) -> Option<&ContentItem> {
        self.by_id.get(&id).map(|&position| &self.items[position])
    }

    /// All items, date descending.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
