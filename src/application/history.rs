use crate::domain::error::AppError;
use crate::domain::model::HistoryItem;
use crate::domain::traits::KvStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Bounded, most-recent-first translation history.
///
/// The whole list lives as one JSON array under a single key. Every
/// operation is a read-modify-write of that blob with no coordination
/// between writers.
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KvStore>,
    key: String,
    max_items: usize,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KvStore>, key: impl Into<String>, max_items: usize) -> Self {
        Self {
            store,
            key: key.into(),
            max_items,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// All items, newest first. A corrupt blob reads as empty.
    pub async fn list(&self) -> Result<Vec<HistoryItem>, AppError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable history");
                Ok(Vec::new())
            }
        }
    }

    pub async fn len(&self) -> Result<usize, AppError> {
        Ok(self.list().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len().await? == 0)
    }

    /// Record a translation made now
    pub async fn add(
        &self,
        original_text: &str,
        translated_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<HistoryItem, AppError> {
        self.add_at(
            Utc::now(),
            original_text,
            translated_text,
            source_lang,
            target_lang,
        )
        .await
    }

    /// Record a translation made at `at`.
    ///
    /// Any earlier entry with the same (text, source, target) is dropped,
    /// the new one goes to the front, and the list is cut to `max_items`.
    pub async fn add_at(
        &self,
        at: DateTime<Utc>,
        original_text: &str,
        translated_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<HistoryItem, AppError> {
        let mut items = self.list().await?;

        // ids double as delete handles, keep them strictly increasing
        let newest = items.iter().map(|i| i.id).max();
        let id = match newest {
            Some(newest) if newest >= at.timestamp_millis() => newest + 1,
            _ => at.timestamp_millis(),
        };

        let item = HistoryItem {
            id,
            original_text: original_text.to_string(),
            translated_text: translated_text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            timestamp: at,
        };

        items.retain(|existing| !existing.same_key(&item));
        items.insert(0, item.clone());
        items.truncate(self.max_items);

        self.save(&items).await?;
        debug!(id = item.id, total = items.len(), "history item added");
        Ok(item)
    }

    /// Delete one item. Returns whether anything was removed.
    pub async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let mut items = self.list().await?;
        let before = items.len();
        items.retain(|item| item.id != id);

        if items.len() == before {
            return Ok(false);
        }

        self.save(&items).await?;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.remove(&self.key).await
    }

    async fn save(&self, items: &[HistoryItem]) -> Result<(), AppError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw).await
    }
}
