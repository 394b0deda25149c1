pub mod auction;
pub mod brand;
pub mod certificate;
pub mod commission;
pub mod discount;
pub mod media;
pub mod page;
pub mod role_permission;
pub mod subscription;
pub mod tenant_user;
pub mod vendor_attribute;

pub use auction::*;
pub use brand::*;
pub use certificate::*;
pub use commission::*;
pub use discount::*;
pub use media::*;
pub use page::*;
pub use role_permission::*;
pub use subscription::*;
pub use tenant_user::*;
pub use vendor_attribute::*;

use serde::de::DeserializeOwned;

use crate::query::PagingStyle;

/// A backend resource that can be listed, created, updated and deleted.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Path below the API prefix, e.g. `brands`.
    const ENDPOINT: &'static str;
    /// Folder under `/languages/` holding the page's translation files.
    const I18N_PAGE: &'static str;
    /// Form fields that must be non-empty before a submit is sent.
    const REQUIRED_FIELDS: &'static [&'static str];
    /// How the list endpoint pages.
    const PAGING: PagingStyle = PagingStyle::Page;
}
