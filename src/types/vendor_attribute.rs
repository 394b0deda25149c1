use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_opt_string, de_opt_u64, de_u64};

/// A vendor-specific value for a display attribute (colors, borders, etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorAttributeValue {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub vendor_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub attribute_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub setting_key: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub value: Option<String>,
}

impl Resource for VendorAttributeValue {
    const ENDPOINT: &'static str = "vendor_attributes_values";
    const I18N_PAGE: &'static str = "VendorAttributesValues";
    const REQUIRED_FIELDS: &'static [&'static str] = &["vendor_id", "attribute_id", "value"];
}
