//! Translation lookup and loading.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::rest::PanelHttpClient;

/// Languages written right to left, matched by two-letter prefix.
const RTL_LANGUAGES: [&str; 5] = ["ar", "he", "fa", "ur", "ps"];

/// Text direction for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn for_language(lang: &str) -> Self {
        let prefix: String = lang.trim().chars().take(2).collect::<String>().to_lowercase();
        if RTL_LANGUAGES.contains(&prefix.as_str()) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Direction::Rtl
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => write!(f, "ltr"),
            Direction::Rtl => write!(f, "rtl"),
        }
    }
}

/// Where a loaded translation table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationSource {
    /// The requested language file.
    Requested,
    /// The default language file, after the requested one failed.
    DefaultLanguage,
    /// The built-in table, after both files failed.
    BuiltIn,
}

/// A nested translation table for one page and language.
#[derive(Debug, Clone)]
pub struct Translations {
    language: String,
    table: Value,
    source: TranslationSource,
}

impl Translations {
    pub fn new(language: impl Into<String>, table: Value) -> Self {
        Self {
            language: language.into(),
            table,
            source: TranslationSource::Requested,
        }
    }

    /// The small table used when no language file can be loaded.
    pub fn built_in(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            table: built_in_table(),
            source: TranslationSource::BuiltIn,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source(&self) -> &TranslationSource {
        &self.source
    }

    pub fn direction(&self) -> Direction {
        Direction::for_language(&self.language)
    }

    /// Raw value at a dotted path, if every segment resolves.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.table, |node, segment| node.get(segment))
            .filter(|v| !v.is_null())
    }

    /// Resolve `key`. Falls back to `fallback` when the path is missing or
    /// the leaf is empty or not a scalar, then to the key itself.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> String {
        let found = match self.lookup(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        found
            .or_else(|| fallback.filter(|f| !f.is_empty()).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }

    /// [`t`](Self::t) with `{name}` placeholders replaced.
    pub fn t_replace(&self, key: &str, fallback: Option<&str>, replacements: &[(&str, &str)]) -> String {
        replacements
            .iter()
            .fold(self.t(key, fallback), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }
}

fn built_in_table() -> Value {
    json!({
        "common": {
            "loading": "Loading...",
            "save": "Save",
            "cancel": "Cancel",
            "edit": "Edit",
            "delete": "Delete",
            "confirm_delete": "Are you sure you want to delete this item?",
            "no_data": "No data found",
            "retry": "Retry"
        },
        "pagination": {
            "previous": "Previous",
            "next": "Next",
            "showing": "Showing {from} to {to} of {total} results"
        },
        "messages": {
            "saved": "Saved successfully",
            "created": "Created successfully",
            "updated": "Updated successfully",
            "deleted": "Deleted successfully",
            "error_loading": "Failed to load data",
            "error_saving": "Failed to save",
            "validation_failed": "Please fill all required fields"
        }
    })
}

/// Loads page translation files with language fallback.
#[derive(Debug, Clone)]
pub struct TranslationLoader {
    http_client: PanelHttpClient,
    default_language: String,
}

impl TranslationLoader {
    pub fn new(http_client: PanelHttpClient, default_language: impl Into<String>) -> Self {
        Self {
            http_client,
            default_language: default_language.into(),
        }
    }

    /// Load `/languages/{page}/{lang}.json`. On failure try the default
    /// language once, then fall back to the built-in table. Never fails.
    pub async fn load(&self, page: &str, lang: &str) -> Translations {
        match self.http_client.get_translations(page, lang).await {
            Ok(table) => {
                debug!(page, lang, "translations loaded");
                return Translations::new(lang, table);
            }
            Err(e) => warn!(page, lang, error = %e, "failed to load translations"),
        }

        if lang != self.default_language {
            let default = self.default_language.as_str();
            match self.http_client.get_translations(page, default).await {
                Ok(table) => {
                    debug!(page, lang = default, "fell back to default language");
                    return Translations {
                        language: default.to_string(),
                        table,
                        source: TranslationSource::DefaultLanguage,
                    };
                }
                Err(e) => {
                    warn!(page, lang = default, error = %e, "failed to load default translations")
                }
            }
        }

        Translations::built_in(lang)
    }
}
