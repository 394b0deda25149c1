use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_bool, de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

/// Membership of a user in a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantUser {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub tenant_id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub user_id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub role_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub entity_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub tenant_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "de_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub joined_at: Option<NaiveDateTime>,
}

impl Resource for TenantUser {
    const ENDPOINT: &'static str = "tenant_users";
    const I18N_PAGE: &'static str = "TenantUsers";
    const REQUIRED_FIELDS: &'static [&'static str] = &["tenant_id", "user_id"];
}
