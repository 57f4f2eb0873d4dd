//! Collection sources: the transport seam behind each entity fetcher.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use catalogsync_core::{FetchError, FetchResult};

/// Reads a whole collection of `T` from wherever it lives.
///
/// This is the only place the catalog suspends. Implementations translate
/// their transport failures into [`FetchError`]; they never hand back a
/// partial collection.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    async fn fetch_collection(&self) -> FetchResult<Vec<T>>;
}

/// In-process source for tests/dev.
///
/// - Serves a canned response, which can be swapped at any time
/// - Counts how often it was asked
#[derive(Debug)]
pub struct InMemorySource<T> {
    response: Mutex<FetchResult<Vec<T>>>,
    calls: AtomicUsize,
}

impl<T: Clone> InMemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            response: Mutex::new(Ok(items)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Replace the response served by later fetches.
    pub fn respond_with(&self, response: FetchResult<Vec<T>>) {
        match self.response.lock() {
            Ok(mut current) => *current = response,
            Err(poisoned) => *poisoned.into_inner() = response,
        }
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> CollectionSource<T> for InMemorySource<T>
where
    T: Clone + Send + 'static,
{
    async fn fetch_collection(&self) -> FetchResult<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = match self.response.lock() {
            Ok(current) => current.clone(),
            Err(_) => Err(FetchError::network("in-memory source lock poisoned")),
        };
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_and_counts() {
        let source = InMemorySource::new(vec![1, 2, 3]);
        assert_eq!(source.fetch_collection().await, Ok(vec![1, 2, 3]));
        assert_eq!(source.calls(), 1);

        source.respond_with(Err(FetchError::backend(500, "Internal Server Error")));
        assert_eq!(
            source.fetch_collection().await,
            Err(FetchError::backend(500, "Internal Server Error"))
        );
        assert_eq!(source.calls(), 2);
    }
}
