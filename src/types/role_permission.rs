use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_opt_string, de_u64};

/// Assignment of one permission to one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermission {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub role_id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub permission_id: u64,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub role_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub key_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub display_name: Option<String>,
}

impl Resource for RolePermission {
    const ENDPOINT: &'static str = "Role_permissions";
    const I18N_PAGE: &'static str = "RolePermissions";
    const REQUIRED_FIELDS: &'static [&'static str] = &["role_id", "permission_id"];
}
