use serde_json::Value;

use crate::envelope::normalize;
use crate::error::{PanelError, Result};
use crate::query::{list_query, FilterSet, PagingStyle};
use crate::rest::PanelHttpClient;
use crate::types::{PageResult, Resource};

impl PanelHttpClient {
    // --- Lists ---

    /// GET {endpoint}?page=&limit=&... - One normalized page of items.
    pub async fn list(
        &self,
        endpoint: &str,
        style: PagingStyle,
        page: u64,
        per_page: u64,
        filters: &FilterSet,
    ) -> Result<PageResult<Value>> {
        let query = list_query(style, page, per_page, filters);
        let body = self.get_json(endpoint, &query).await?;
        Ok(normalize(&body, page, per_page))
    }

    /// GET {endpoint}?... - One page decoded into `R` records.
    pub async fn list_resource<R: Resource>(
        &self,
        endpoint: &str,
        page: u64,
        per_page: u64,
        filters: &FilterSet,
    ) -> Result<PageResult<R>> {
        self.list(endpoint, R::PAGING, page, per_page, filters)
            .await?
            .decode_items()
    }

    // --- Single items ---

    /// GET {endpoint}/{id} - The first item of the normalized body.
    pub async fn fetch_item(&self, endpoint: &str, id: u64) -> Result<Value> {
        let path = format!("{}/{id}", endpoint.trim_end_matches('/'));
        let body = self.get_json(&path, &[]).await?;
        normalize(&body, 1, 1)
            .items
            .into_iter()
            .next()
            .ok_or_else(|| PanelError::NotFound(format!("{endpoint}/{id}")))
    }

    // --- Translations ---

    /// GET /languages/{page}/{lang}.json - Nested translation mapping.
    pub async fn get_translations(&self, page: &str, lang: &str) -> Result<Value> {
        let body = self
            .get_json(&format!("/languages/{page}/{lang}.json"), &[])
            .await?;
        if !body.is_object() {
            return Err(PanelError::NotFound(format!("translations {page}/{lang}")));
        }
        Ok(body)
    }
}
