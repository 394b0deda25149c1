use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_bool, de_opt_string, de_opt_u64, de_u64};

/// An uploaded image in the media library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub owner_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub image_type_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub filename: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub thumb_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub visibility: Option<String>,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_main: bool,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl MediaItem {
    /// Thumbnail if present, else the full image.
    pub fn preview_url(&self) -> &str {
        self.thumb_url.as_deref().unwrap_or(&self.url)
    }
}

impl Resource for MediaItem {
    const ENDPOINT: &'static str = "images";
    const I18N_PAGE: &'static str = "MediaStudio";
    const REQUIRED_FIELDS: &'static [&'static str] = &["url"];
}
