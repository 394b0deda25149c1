use std::collections::HashMap;
use std::time::Duration;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::debug;

use crate::cache::LookupCache;
use crate::error::Result;
use crate::rest::PanelHttpClient;

/// Fetches single records by id (`GET {endpoint}/{id}`) and keeps them in a
/// [`LookupCache`], e.g. tenant or entity names shown next to table rows.
#[derive(Debug)]
pub struct LookupResolver {
    http_client: PanelHttpClient,
    endpoint: String,
    cache: LookupCache<Value>,
}

impl LookupResolver {
    pub fn new(http_client: PanelHttpClient, endpoint: impl Into<String>, ttl: Duration) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            cache: LookupCache::new(ttl),
        }
    }

    /// The record with `id`. Returns [`PanelError::NotFound`] when the
    /// backend answers without an item. Concurrent misses for one id share
    /// a single request.
    ///
    /// [`PanelError::NotFound`]: crate::error::PanelError::NotFound
    pub async fn get(&self, id: u64) -> Result<Value> {
        self.cache
            .get_or_try_insert(id.to_string(), async {
                debug!(endpoint = %self.endpoint, id, "lookup miss");
                self.http_client.fetch_item(&self.endpoint, id).await
            })
            .await
    }

    /// Display name for `id` from the first present of `fields`, falling back
    /// to `#id` when the record or the fields are missing.
    pub async fn name_of(&self, id: u64, fields: &[&str]) -> String {
        match self.get(id).await {
            Ok(item) => fields
                .iter()
                .find_map(|f| item.get(*f).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{id}")),
            Err(_) => format!("#{id}"),
        }
    }

    /// Resolve many ids concurrently. Failed lookups are left out.
    pub async fn get_many(&self, ids: &[u64]) -> HashMap<u64, Value> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        let results = join_all(unique.iter().map(|id| self.get(*id))).await;
        unique
            .into_iter()
            .zip(results)
            .filter_map(|(id, res)| res.ok().map(|v| (id, v)))
            .collect()
    }

    /// Forget cached records, e.g. after switching tenant.
    pub fn clear(&self) {
        self.cache.clear();
    }
}
