use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One page of resource items plus the metadata needed to paginate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub meta: PaginationInfo,
}

impl PageResult<Value> {
    /// Decode the raw items into a typed record.
    pub fn decode_items<T: DeserializeOwned>(self) -> Result<PageResult<T>> {
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(PageResult {
            items,
            meta: self.meta,
        })
    }
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination metadata. The derived fields (`from`, `to`, `last_page`)
/// always agree with `total`, `page` and `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub from: u64,
    pub to: u64,
    pub last_page: u64,
}

impl PaginationInfo {
    pub fn new(total: u64, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let from = if total > 0 { (page - 1) * per_page + 1 } else { 0 };
        let to = (page * per_page).min(total);
        let last_page = total.div_ceil(per_page).max(1);
        Self {
            total,
            page,
            per_page,
            from,
            to,
            last_page,
        }
    }

    /// Parse a server-supplied meta object. Accepts numbers or numeric
    /// strings under the usual key spellings; missing keys fall back to the
    /// requested values.
    pub fn from_meta(meta: &Value, page: u64, per_page: u64, fallback_total: u64) -> Self {
        let total = lookup_u64(meta, &["total", "total_items", "totalItems", "count"])
            .unwrap_or(fallback_total);
        let page = lookup_u64(meta, &["page", "current_page", "currentPage"]).unwrap_or(page);
        let per_page = lookup_u64(meta, &["per_page", "perPage", "limit", "page_size"])
            .unwrap_or(per_page);
        Self::new(total, page, per_page)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

fn lookup_u64(meta: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match meta.get(*k)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
