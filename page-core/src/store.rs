//! Shared page storage.
//!
//! [`PageStore`] is the persistence collaborator behind the Load/Save
//! contract: a thread-safe map of [`PageDocument`]s, optionally mirrored to
//! one JSON file per page. Saves are replace-all; the store never merges
//! component lists.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::component::ComponentInstance;
use crate::document::{normalize_components, PageDocument, PageSummary};
use crate::error::PageError;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// The store was created without a data directory.
    #[error("No data directory configured")]
    NoDataDir,
    /// The collaborator rejected the write.
    #[error("Rejected: {0}")]
    Rejected(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A page file could not be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] PageError),
}

/// Supplies a page's component list to an editing session.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Load the page with the given id.
    async fn load(&self, page_id: &str) -> Result<PageDocument, StoreError>;
}

/// Receives a page's full component list on save.
#[async_trait]
pub trait PageSink: Send + Sync {
    /// Replace the page's components with `components`.
    async fn save(
        &self,
        page_id: &str,
        components: Vec<ComponentInstance>,
    ) -> Result<(), StoreError>;
}

/// Thread-safe page storage shared across sessions and HTTP handlers.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Arc<RwLock<HashMap<String, PageDocument>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl PageStore {
    /// An empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store mirrored to JSON files in `data_dir`, which is created if
    /// missing. Existing files are not loaded until [`Self::load_all_from_disk`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            pages: Arc::default(),
            data_dir: Some(data_dir),
        })
    }

    /// Page by id.
    #[must_use]
    pub fn get(&self, page_id: &str) -> Option<PageDocument> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages.get(page_id).cloned()
    }

    /// Page by public slug.
    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<PageDocument> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages.values().find(|page| page.slug == slug).cloned()
    }

    /// Listing of every page, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<PageSummary> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut summaries: Vec<PageSummary> = pages.values().map(PageDocument::summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Number of pages held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or replace a whole document.
    ///
    /// The file is written before the in-memory copy changes, so a failed
    /// write leaves the store as it was.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] if the
    /// page cannot be written to the data directory.
    pub fn upsert(&self, mut doc: PageDocument) -> Result<PageDocument, StoreError> {
        doc.normalize();
        doc.updated_at = current_timestamp_ms();
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        self.persist_page(&doc)?;
        pages.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    /// Replace a page's component list, creating the page if needed.
    /// List position is kept and `order` renumbered to match.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upsert`]; on error the stored page is unchanged.
    pub fn replace_components(
        &self,
        page_id: &str,
        mut components: Vec<ComponentInstance>,
    ) -> Result<PageDocument, StoreError> {
        crate::component::renumber(&mut components);
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut doc = pages
            .get(page_id)
            .cloned()
            .unwrap_or_else(|| PageDocument::new(page_id, page_id));
        doc.components = components;
        doc.updated_at = current_timestamp_ms();
        self.persist_page(&doc)?;
        pages.insert(page_id.to_string(), doc.clone());
        drop(pages);
        tracing::info!(page_id, components = doc.components.len(), "page saved");
        Ok(doc)
    }

    /// Remove a page and its file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the page does not exist.
    pub fn delete(&self, page_id: &str) -> Result<(), StoreError> {
        {
            let mut pages = self
                .pages
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            pages
                .remove(page_id)
                .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))?;
        }
        self.delete_page_file(page_id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn page_path(&self, page_id: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", sanitize_filename(page_id))))
    }

    /// Write a page to disk. No-op without a data directory.
    fn persist_page(&self, doc: &PageDocument) -> Result<(), StoreError> {
        let Some(path) = self.page_path(&doc.id) else {
            return Ok(());
        };
        let json = doc.to_json()?;
        std::fs::write(&path, json).map_err(|e| {
            tracing::warn!(
                page_id = %doc.id,
                path = %path.display(),
                "Failed to persist page: {e}"
            );
            StoreError::Io(e)
        })
    }

    fn delete_page_file(&self, page_id: &str) {
        let Some(path) = self.page_path(page_id) else {
            return;
        };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete page file {}: {e}", path.display());
            }
        }
    }

    /// Load one page file into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data directory, or the file is
    /// missing or unparsable.
    pub fn load_page_from_disk(&self, page_id: &str) -> Result<PageDocument, StoreError> {
        let path = self.page_path(page_id).ok_or(StoreError::NoDataDir)?;
        let contents = std::fs::read_to_string(&path)?;
        let doc = PageDocument::from_json(&contents)?;
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    /// Load every `*.json` page in the data directory. Unparsable files are
    /// skipped with a warning. Returns the ids loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data directory or it can't be read.
    pub fn load_all_from_disk(&self) -> Result<Vec<String>, StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load_page_from_disk(stem) {
                Ok(doc) => loaded.push(doc.id),
                Err(e) => tracing::warn!("Skipping page file {}: {e}", path.display()),
            }
        }
        loaded.sort();
        Ok(loaded)
    }
}

#[async_trait]
impl PageSource for PageStore {
    async fn load(&self, page_id: &str) -> Result<PageDocument, StoreError> {
        let mut doc = self
            .get(page_id)
            .ok_or_else(|| StoreError::PageNotFound(page_id.to_string()))?;
        normalize_components(&mut doc.components);
        Ok(doc)
    }
}

#[async_trait]
impl PageSink for PageStore {
    async fn save(
        &self,
        page_id: &str,
        components: Vec<ComponentInstance>,
    ) -> Result<(), StoreError> {
        self.replace_components(page_id, components).map(|_| ())
    }
}

/// Sanitize a page id for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(page_id: &str) -> String {
    page_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
