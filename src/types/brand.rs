use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_bool, de_opt_string, de_opt_u64, de_u64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub tenant_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub entity_id: Option<u64>,
    #[serde(default)]
    pub slug: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_featured: bool,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub translations: Vec<BrandTranslation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandTranslation {
    pub language_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub description: Option<String>,
}

impl Brand {
    /// Name in `lang`, else the untranslated name, else the slug.
    pub fn display_name(&self, lang: &str) -> &str {
        self.translations
            .iter()
            .find(|t| t.language_code == lang && !t.name.is_empty())
            .map(|t| t.name.as_str())
            .or(self.name.as_deref())
            .unwrap_or(&self.slug)
    }
}

impl Resource for Brand {
    const ENDPOINT: &'static str = "brands";
    const I18N_PAGE: &'static str = "Brands";
    const REQUIRED_FIELDS: &'static [&'static str] = &["slug"];
}
