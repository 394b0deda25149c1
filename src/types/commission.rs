use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::query::PagingStyle;
use crate::types::Resource;
use crate::utils::{de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

/// A commission charged to a vendor entity for one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionTransaction {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub entity_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub order_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub base_amount: Option<Decimal>,
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
    #[serde(default)]
    pub commission_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl CommissionTransaction {
    /// Commission implied by `base_amount * commission_rate / 100`, rounded
    /// to two places. Used when the backend omits `commission_amount`.
    pub fn expected_commission(&self) -> Option<Decimal> {
        let base = self.base_amount?;
        let rate = self.commission_rate?;
        Some((base * rate / Decimal::ONE_HUNDRED).round_dp(2))
    }
}

impl Resource for CommissionTransaction {
    const ENDPOINT: &'static str = "commission_transactions";
    const I18N_PAGE: &'static str = "Commissions";
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["entity_id", "transaction_type", "base_amount", "currency_code"];
    const PAGING: PagingStyle = PagingStyle::Offset;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionPayment {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub entity_id: Option<u64>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency_code: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub paid_at: Option<NaiveDateTime>,
}

impl Resource for CommissionPayment {
    const ENDPOINT: &'static str = "commission_payments";
    const I18N_PAGE: &'static str = "Commissions";
    const REQUIRED_FIELDS: &'static [&'static str] = &["entity_id", "amount"];
    const PAGING: PagingStyle = PagingStyle::Offset;
}
