use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::Resource;
use crate::utils::{de_opt_string, de_opt_timestamp, de_opt_u64, de_u64};

/// Workflow status of a certificate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Draft,
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Issued,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRequest {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub tenant_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub entity_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub importer_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub transport_method: Option<String>,
    #[serde(default)]
    pub status: Option<CertificateStatus>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

impl Resource for CertificateRequest {
    const ENDPOINT: &'static str = "certificates_requests";
    const I18N_PAGE: &'static str = "CertificateManagement";
    const REQUIRED_FIELDS: &'static [&'static str] = &["tenant_id", "entity_id", "importer_name"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateAudit {
    #[serde(deserialize_with = "de_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub request_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_u64")]
    pub auditor_user_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub audit_date: Option<NaiveDateTime>,
}

impl Resource for CertificateAudit {
    const ENDPOINT: &'static str = "certificates_audits";
    const I18N_PAGE: &'static str = "CertificateManagement";
    const REQUIRED_FIELDS: &'static [&'static str] = &["request_id", "auditor_user_id"];
}
