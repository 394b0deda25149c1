use serde_json::Value;
use url::form_urlencoded;

/// Query parameters reserved for pagination; filters never override them.
const RESERVED: [&str; 3] = ["page", "limit", "offset"];

/// How a list endpoint expects the requested page to be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagingStyle {
    /// `page=<n>&limit=<per_page>`
    #[default]
    Page,
    /// `limit=<per_page>&offset=<(n-1)*per_page>`
    Offset,
}

/// Ordered set of list filters. Each key appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    entries: Vec<(String, Value)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any earlier value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder form of [`FilterSet::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries that would be sent, with their values rendered as strings.
    /// `null`, `""`, arrays and objects are skipped.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.as_str(), s)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Query pairs for one list request: the paging parameters, then every
/// non-empty filter.
pub fn list_query(
    style: PagingStyle,
    page: u64,
    per_page: u64,
    filters: &FilterSet,
) -> Vec<(String, String)> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let mut query = match style {
        PagingStyle::Page => vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), per_page.to_string()),
        ],
        PagingStyle::Offset => vec![
            ("limit".to_string(), per_page.to_string()),
            ("offset".to_string(), ((page - 1) * per_page).to_string()),
        ],
    };
    query.extend(
        filters
            .pairs()
            .into_iter()
            .filter(|(k, _)| !RESERVED.contains(k))
            .map(|(k, v)| (k.to_string(), v)),
    );
    query
}

/// Encode query pairs as an `application/x-www-form-urlencoded` string.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
