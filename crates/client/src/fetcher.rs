//! Session-cached entity fetchers.

use std::sync::Arc;

use tokio::sync::Mutex;

use catalogsync_core::FetchResult;

use crate::source::CollectionSource;

/// Single-shot, shared read of one entity collection.
///
/// The first call goes to the source; its outcome (success *or* failure) is
/// kept for the rest of the session and handed to every later caller. Callers
/// racing the first fetch wait for it instead of issuing their own. A failed
/// fetch is never retried here; only [`EntityFetcher::invalidate`] clears it.
pub struct EntityFetcher<T> {
    entity: &'static str,
    source: Arc<dyn CollectionSource<T>>,
    cached: Mutex<Option<FetchResult<Vec<T>>>>,
}

impl<T> EntityFetcher<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(entity: &'static str, source: Arc<dyn CollectionSource<T>>) -> Self {
        Self {
            entity,
            source,
            cached: Mutex::new(None),
        }
    }

    pub async fn fetch_all(&self) -> FetchResult<Vec<T>> {
        let mut cached = self.cached.lock().await;
        if let Some(result) = cached.as_ref() {
            tracing::debug!(entity = self.entity, "serving cached collection");
            return result.clone();
        }

        let result = self.source.fetch_collection().await;
        match &result {
            Ok(items) => tracing::info!(entity = self.entity, count = items.len(), "collection fetched"),
            Err(err) => tracing::error!(entity = self.entity, error = %err, "collection fetch failed"),
        }

        *cached = Some(result.clone());
        result
    }

    /// Forget the cached outcome; the next `fetch_all` asks the source again.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
        tracing::debug!(entity = self.entity, "collection cache invalidated");
    }

    pub async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }
}

impl<T> core::fmt::Debug for EntityFetcher<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityFetcher")
            .field("entity", &self.entity)
            .finish_non_exhaustive()
    }
}
