//! HTTP collection source (`reqwest`).

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use catalogsync_core::{FetchError, FetchResult};

use crate::source::CollectionSource;

/// GETs a JSON array from a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpSource<T> {
    client: reqwest::Client,
    url: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpSource<T> {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<T> CollectionSource<T> for HttpSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_collection(&self) -> FetchResult<Vec<T>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("request failed");
            return Err(FetchError::backend(status.as_u16(), message));
        }

        resp.json::<Vec<T>>()
            .await
            .map_err(|e| FetchError::decode(e.to_string()))
    }
}
