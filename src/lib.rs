pub mod cache;
pub mod client;
pub mod config;
pub mod crud;
pub mod envelope;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod lookup;
pub mod notify;
pub mod query;
pub mod render;
pub mod rest;
pub mod tabs;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::Panel;
pub use config::PanelConfig;
pub use error::{ErrorKind, PanelError, Result};

// REST client
pub use rest::{ApiResponse, PanelHttpClient};

// Envelope + pagination
pub use envelope::{normalize, Envelope};
pub use types::{PageResult, PaginationInfo};

// Queries
pub use query::{FilterSet, PagingStyle};

// Loading + tabs
pub use loader::{LoadOutcome, PageView, PaginatedLoader};
pub use tabs::{TabMachine, TabView};

// Forms
pub use crud::{BodyEncoding, CrudController, CrudMessages, FormData, FormView, IdStyle};

// Translations
pub use i18n::{Direction, TranslationLoader, TranslationSource, Translations};

// Lookups
pub use cache::LookupCache;
pub use lookup::LookupResolver;

// Notifications
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};

// Rendering
pub use render::{escape_html, pagination_controls, pagination_summary, PageControl};

// Resources
pub use types::{
    Auction, Brand, BrandTranslation, CertificateAudit, CertificateRequest, CertificateStatus,
    CommissionPayment, CommissionTransaction, Discount, DiscountType, MediaItem, Resource,
    RolePermission, Subscription, SubscriptionPlan, TenantUser, VendorAttributeValue,
};
