use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub tenant_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub product_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub auction_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub starting_price: Option<Decimal>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub end_date: Option<NaiveDateTime>,
}

impl Auction {
    /// Highest of current and starting price.
    pub fn leading_price(&self) -> Option<Decimal> {
        match (self.current_price, self.starting_price) {
            (Some(c), Some(s)) => Some(c.max(s)),
            (c, s) => c.or(s),
        }
    }

    pub fn has_ended_at(&self, now: NaiveDateTime) -> bool {
        self.end_date.is_some_and(|end| end <= now)
    }
}

impl Resource for Auction {
    const ENDPOINT: &'static str = "auctions";
    const I18N_PAGE: &'static str = "Auctions";
    const REQUIRED_FIELDS: &'static [&'static str] = &["title", "starting_price", "currency_code"];
}
