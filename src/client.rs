use std::sync::Arc;

use crate::config::PanelConfig;
use crate::crud::{CrudController, CrudMessages, FormView};
use crate::error::Result;
use crate::i18n::{TranslationLoader, Translations};
use crate::loader::{PageView, PaginatedLoader};
use crate::lookup::LookupResolver;
use crate::notify::Notifier;
use crate::query::FilterSet;
use crate::rest::PanelHttpClient;
use crate::types::{PageResult, Resource};

/// Entry point for one admin backend: builds loaders, CRUD controllers and
/// lookups that share one HTTP client and config.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Configuration the client was built from.
    pub config: PanelConfig,
    /// HTTP client.
    pub http_client: PanelHttpClient,
    translations: TranslationLoader,
}

impl Panel {
    pub fn new(config: PanelConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        let http_client = PanelHttpClient::new(&config.base_url, config.csrf_token.clone())?;
        let translations = TranslationLoader::new(http_client.clone(), &config.default_language);
        Ok(Self {
            config,
            http_client,
            translations,
        })
    }

    /// Build from `PANEL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(PanelConfig::from_env()?)
    }

    /// Full URL of a resource endpoint.
    pub fn endpoint(&self, resource: &str) -> String {
        self.config.resource_url(resource)
    }

    /// Loader for `resource` rendering into `view`.
    pub fn loader_for(&self, resource: &str, view: Arc<dyn PageView>) -> PaginatedLoader {
        PaginatedLoader::new(
            self.http_client.clone(),
            self.endpoint(resource),
            self.config.per_page,
            view,
        )
    }

    /// Loader for a typed resource, using its paging style.
    pub fn loader<R: Resource>(&self, view: Arc<dyn PageView>) -> PaginatedLoader {
        self.loader_for(R::ENDPOINT, view).with_paging(R::PAGING)
    }

    /// CRUD controller for a typed resource, reloading `loader` after each
    /// successful mutation.
    pub fn crud<R: Resource>(
        &self,
        loader: Arc<PaginatedLoader>,
        form: Arc<dyn FormView>,
        notifier: Arc<dyn Notifier>,
    ) -> CrudController {
        CrudController::new(
            self.http_client.clone(),
            self.endpoint(R::ENDPOINT),
            loader,
            form,
            notifier,
        )
        .with_required_fields(R::REQUIRED_FIELDS.iter().copied())
        .with_put_emulation(self.config.emulate_put)
        .with_notification_duration(self.config.notification_duration)
    }

    /// Same as [`crud`](Self::crud), with success texts from `tr`.
    pub fn crud_translated<R: Resource>(
        &self,
        loader: Arc<PaginatedLoader>,
        form: Arc<dyn FormView>,
        notifier: Arc<dyn Notifier>,
        tr: &Translations,
    ) -> CrudController {
        self.crud::<R>(loader, form, notifier)
            .with_messages(CrudMessages::from_translations(tr))
    }

    /// Cached by-id lookup for `resource`.
    pub fn lookup(&self, resource: &str) -> LookupResolver {
        LookupResolver::new(
            self.http_client.clone(),
            self.endpoint(resource),
            self.config.lookup_ttl,
        )
    }

    /// One page of a typed resource, without a view.
    pub async fn list<R: Resource>(&self, page: u64, filters: &FilterSet) -> Result<PageResult<R>> {
        self.http_client
            .list_resource::<R>(&self.endpoint(R::ENDPOINT), page, self.config.per_page, filters)
            .await
    }

    /// Translations for `page` in the configured language.
    pub async fn load_translations(&self, page: &str) -> Translations {
        self.translations.load(page, &self.config.language).await
    }

    /// Translations for a typed resource's page.
    pub async fn translations_for<R: Resource>(&self) -> Translations {
        self.load_translations(R::I18N_PAGE).await
    }
}
