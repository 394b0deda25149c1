use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_bool, de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub plan_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub billing_period: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_active: bool,
}

impl Resource for SubscriptionPlan {
    const ENDPOINT: &'static str = "subscription_plans";
    const I18N_PAGE: &'static str = "Subscriptions";
    const REQUIRED_FIELDS: &'static [&'static str] = &["plan_name", "billing_period", "price"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub tenant_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub plan_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub seller_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub plan_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub end_date: Option<NaiveDateTime>,
}

impl Resource for Subscription {
    const ENDPOINT: &'static str = "subscriptions";
    const I18N_PAGE: &'static str = "Subscriptions";
    const REQUIRED_FIELDS: &'static [&'static str] = &["tenant_id", "plan_id"];
}
