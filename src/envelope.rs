//! Response envelope normalization.
//!
//! The admin backend wraps list data in several loosely-specified shapes.
//! [`Envelope::classify`] resolves the shape once at the transport boundary
//! and [`normalize`] turns any of them into a [`PageResult`].

use serde_json::{Map, Value};

use crate::types::{PageResult, PaginationInfo};

/// The list shapes the backend is known to return.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<'a> {
    /// `[ ... ]`
    Bare(&'a [Value]),
    /// `{ "data": [ ... ] }`
    Data(&'a [Value]),
    /// `{ "data": { "items": [ ... ], "meta": { ... } } }`, also with
    /// `data.data` in place of `data.items` and `data.pagination` in place
    /// of `data.meta`.
    Nested {
        items: &'a [Value],
        meta: Option<&'a Value>,
    },
    /// `{ "items": [ ... ] }`
    Items(&'a [Value]),
    /// A single object carrying an `id`.
    Single(&'a Value),
    /// An object whose values are records with an `id` (keyed by id or
    /// slug). Other values, such as a sibling meta object, are dropped.
    Keyed(Vec<&'a Value>),
    /// Nothing recognizable, including `null`.
    Empty,
}

impl<'a> Envelope<'a> {
    /// Classify a decoded body. The first matching shape wins.
    ///
    /// A present, non-null `data` is the payload: the single-object and
    /// keyed rules apply to it rather than to the outer object.
    pub fn classify(body: &'a Value) -> Self {
        let obj = match body {
            Value::Array(items) => return Envelope::Bare(items),
            Value::Object(obj) => obj,
            _ => return Envelope::Empty,
        };

        if let Some(data) = obj.get("data") {
            if let Value::Array(items) = data {
                return Envelope::Data(items);
            }
            if data.is_object() {
                if let Some(items) = nested_items(data) {
                    return Envelope::Nested {
                        items,
                        meta: nested_meta(data),
                    };
                }
                return Envelope::from_object(data);
            }
        }

        if let Some(Value::Array(items)) = obj.get("items") {
            return Envelope::Items(items);
        }

        Envelope::from_object(body)
    }

    /// A record with an `id`, else the values that are records.
    fn from_object(payload: &'a Value) -> Self {
        if has_id(payload) {
            return Envelope::Single(payload);
        }
        let records: Vec<&Value> = payload
            .as_object()
            .map(|obj| obj.values().filter(|v| has_id(v)).collect())
            .unwrap_or_default();
        if records.is_empty() {
            Envelope::Empty
        } else {
            Envelope::Keyed(records)
        }
    }

    pub fn items(&self) -> Vec<Value> {
        match self {
            Envelope::Bare(items)
            | Envelope::Data(items)
            | Envelope::Items(items)
            | Envelope::Nested { items, .. } => items.to_vec(),
            Envelope::Single(item) => vec![(*item).clone()],
            Envelope::Keyed(items) => items.iter().map(|v| (*v).clone()).collect(),
            Envelope::Empty => Vec::new(),
        }
    }
}

fn nested_items(data: &Value) -> Option<&[Value]> {
    ["items", "data"]
        .iter()
        .find_map(|k| data.get(*k).and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn has_id(value: &Value) -> bool {
    value.get("id").is_some_and(|id| !id.is_null())
}

fn nested_meta(data: &Value) -> Option<&Value> {
    ["meta", "pagination"]
        .iter()
        .find_map(|k| data.get(*k).filter(|m| m.is_object()))
}

const META_KEYS: [&str; 5] = ["total", "total_items", "totalItems", "current_page", "per_page"];

/// Find an explicit meta object: `data.meta` or `data.pagination`, then
/// `meta`, `pagination` or `_meta`, then pagination keys sitting directly
/// on the body.
fn explicit_meta<'a>(body: &'a Value, envelope: &Envelope<'a>) -> Option<&'a Value> {
    if let Envelope::Nested { meta: Some(meta), .. } = envelope {
        return Some(*meta);
    }
    let obj: &Map<String, Value> = body.as_object()?;
    if let Some(meta) = obj.get("data").and_then(nested_meta) {
        return Some(meta);
    }
    for key in ["meta", "pagination", "_meta"] {
        if let Some(meta) = obj.get(key).filter(|m| m.is_object()) {
            return Some(meta);
        }
    }
    if matches!(envelope, Envelope::Single(_)) {
        return None;
    }
    META_KEYS
        .iter()
        .any(|k| obj.contains_key(*k))
        .then_some(body)
}

/// Normalize a decoded response body into items plus pagination metadata.
///
/// When the body carries no meta, it is synthesized so that the returned
/// items occupy the requested page exactly.
pub fn normalize(body: &Value, page: u64, per_page: u64) -> PageResult<Value> {
    let envelope = Envelope::classify(body);
    let items = envelope.items();
    let page = page.max(1);
    let per_page = per_page.max(1);
    let synthetic_total = (page - 1) * per_page + items.len() as u64;

    let meta = match explicit_meta(body, &envelope) {
        Some(meta) => PaginationInfo::from_meta(meta, page, per_page, synthetic_total),
        None => PaginationInfo::new(synthetic_total, page, per_page),
    };

    PageResult { items, meta }
}
