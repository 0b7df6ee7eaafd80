//! Content storage boundary.
//!
//! The host CMS owns real storage; this crate only needs the narrow
//! [`ContentStore`] seam: fetch an item, persist new content, persist
//! one metadata key. [`FileStore`] keeps one JSON document per item
//! under a root directory (atomic writes), which is enough to run the
//! server standalone; [`MemoryStore`] backs the tests.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OptimizerError, OptimizerResult};
use crate::util::atomic::atomic_write;

/// One stored content item, every field included so the inspection
/// operation can dump them all. `meta` is the open per-item field bag;
/// values keep their JSON shape and are validated here at the parse
/// boundary, not in the walker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub status: String,
    /// Content type (post, page, ...).
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default)]
    pub menu_order: i64,
    /// Taxonomy label -> assigned term names.
    #[serde(default)]
    pub taxonomies: BTreeMap<String, Vec<String>>,
    /// Custom fields (post meta).
    #[serde(default)]
    pub meta: BTreeMap<String, Value>,
}

/// Storage operations the optimizer needs from the host.
///
/// One replacement operation is one `load` happens-before traversal
/// happens-before `save_content` sequence; no version check, last
/// write wins.
pub trait ContentStore: Send {
    /// Fetch an item. `ItemNotFound` if the id is unknown.
    fn load(&self, id: u64) -> OptimizerResult<Item>;

    /// Persist new document content for an existing item.
    fn save_content(&self, id: u64, content: &str) -> OptimizerResult<()>;

    /// Persist one metadata key for an existing item.
    fn set_meta(&self, id: u64, key: &str, value: &str) -> OptimizerResult<()>;
}

/// JSON-file-per-item store rooted at a directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn item_path(&self, id: u64) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Create or replace an item document. Used for seeding.
    pub fn put(&self, item: &Item) -> OptimizerResult<()> {
        let path = self.item_path(item.id);
        let body = serde_json::to_string_pretty(item)?;
        atomic_write(&path, &body).map_err(|e| OptimizerError::Persist {
            id: item.id,
            reason: e.to_string(),
        })
    }

    fn save(&self, item: &Item) -> OptimizerResult<()> {
        self.put(item)
    }
}

impl ContentStore for FileStore {
    fn load(&self, id: u64) -> OptimizerResult<Item> {
        let path = self.item_path(id);
        let raw = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                OptimizerError::ItemNotFound { id }
            } else {
                OptimizerError::Io { path, source }
            }
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_content(&self, id: u64, content: &str) -> OptimizerResult<()> {
        let mut item = self.load(id)?;
        item.content = content.to_owned();
        self.save(&item)
    }

    fn set_meta(&self, id: u64, key: &str, value: &str) -> OptimizerResult<()> {
        let mut item = self.load(id)?;
        item.meta
            .insert(key.to_owned(), Value::String(value.to_owned()));
        self.save(&item)
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<u64, Item>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: Item) {
        self.lock().insert(item.id, item);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<u64, Item>> {
        self.items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, id: u64) -> OptimizerResult<Item> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or(OptimizerError::ItemNotFound { id })
    }

    fn save_content(&self, id: u64, content: &str) -> OptimizerResult<()> {
        let mut items = self.lock();
        let item = items
            .get_mut(&id)
            .ok_or(OptimizerError::ItemNotFound { id })?;
        item.content = content.to_owned();
        Ok(())
    }

    fn set_meta(&self, id: u64, key: &str, value: &str) -> OptimizerResult<()> {
        let mut items = self.lock();
        let item = items
            .get_mut(&id)
            .ok_or(OptimizerError::ItemNotFound { id })?;
        item.meta
            .insert(key.to_owned(), Value::String(value.to_owned()));
        Ok(())
    }
}

/// A minimal valid item for tests and seeding examples.
#[must_use]
pub fn sample_item(id: u64, title: &str, content: &str) -> Item {
    Item {
        id,
        title: title.to_owned(),
        content: content.to_owned(),
        excerpt: String::new(),
        status: "publish".to_owned(),
        kind: "page".to_owned(),
        created: "2025-01-01 00:00:00".to_owned(),
        modified: "2025-01-01 00:00:00".to_owned(),
        author: "admin".to_owned(),
        slug: title.to_lowercase().replace(' ', "-"),
        parent_id: 0,
        menu_order: 0,
        taxonomies: BTreeMap::new(),
        meta: BTreeMap::new(),
    }
}
