use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_bool, de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
    FreeShipping,
    BuyXGetY,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub tenant_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub discount_type: Option<DiscountType>,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_stackable: bool,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub starts_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub ends_at: Option<NaiveDateTime>,
}

impl Discount {
    /// Whether `now` falls inside the discount's validity window. Open ends
    /// are unbounded.
    pub fn is_running_at(&self, now: NaiveDateTime) -> bool {
        self.starts_at.map_or(true, |s| s <= now) && self.ends_at.map_or(true, |e| now < e)
    }
}

impl Resource for Discount {
    const ENDPOINT: &'static str = "discounts";
    const I18N_PAGE: &'static str = "Discounts";
    const REQUIRED_FIELDS: &'static [&'static str] = &["type", "value"];
}
