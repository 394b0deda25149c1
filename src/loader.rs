//! Paginated list loading for one view.
//!
//! A [`PaginatedLoader`] owns the page/filter state of a single table view.
//! Starting a load cancels whatever load is still outstanding for that
//! view, so a slow earlier response can never overwrite a newer one.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::envelope::normalize;
use crate::error::PanelError;
use crate::query::{encode_query, list_query, FilterSet, PagingStyle};
use crate::rest::PanelHttpClient;
use crate::types::{PageResult, PaginationInfo};

/// Rendering callbacks for a paginated table.
pub trait PageView: Send + Sync {
    /// Called before the request is sent.
    fn show_loading(&self) {}

    fn render_rows(&self, items: &[Value]);

    fn render_pagination(&self, meta: &PaginationInfo);

    /// Called on failure. Previously rendered rows stay as they are.
    fn show_error(&self, error: &PanelError);
}

/// Result of one [`PaginatedLoader::load`] call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Rows and pagination were rendered.
    Rendered(PageResult<Value>),
    /// The error was shown.
    Failed(PanelError),
    /// A newer load started first; nothing was rendered.
    Superseded,
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, LoadOutcome::Rendered(_))
    }
}

#[derive(Debug, Default)]
struct LoaderState {
    page: u64,
    filters: FilterSet,
    last_meta: Option<PaginationInfo>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

pub struct PaginatedLoader {
    http_client: PanelHttpClient,
    endpoint: String,
    paging: PagingStyle,
    per_page: u64,
    view: Arc<dyn PageView>,
    state: Mutex<LoaderState>,
    render_lock: Mutex<()>,
}

impl PaginatedLoader {
    pub fn new(
        http_client: PanelHttpClient,
        endpoint: impl Into<String>,
        per_page: u64,
        view: Arc<dyn PageView>,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            paging: PagingStyle::Page,
            per_page: per_page.max(1),
            view,
            state: Mutex::new(LoaderState {
                page: 1,
                ..Default::default()
            }),
            render_lock: Mutex::new(()),
        }
    }

    pub fn with_paging(mut self, paging: PagingStyle) -> Self {
        self.paging = paging;
        self
    }

    fn lock(&self) -> MutexGuard<'_, LoaderState> {
        // Poisoning is ignored: the state is plain data.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load `page` with `filters`, rendering the result through the view.
    pub async fn load(&self, page: u64, filters: &FilterSet) -> LoadOutcome {
        let page = page.max(1);
        let (generation, token) = {
            let mut state = self.lock();
            if let Some(previous) = state.in_flight.take() {
                debug!(endpoint = %self.endpoint, "cancelling outstanding load");
                previous.cancel();
            }
            state.generation += 1;
            state.page = page;
            state.filters = filters.clone();
            let token = CancellationToken::new();
            state.in_flight = Some(token.clone());
            (state.generation, token)
        };

        let query = list_query(self.paging, page, self.per_page, filters);
        debug!(endpoint = %self.endpoint, query = %encode_query(&query), "loading page");
        self.view.show_loading();

        let result = self
            .http_client
            .get_json_cancellable(&self.endpoint, &query, &token)
            .await
            .map(|body| normalize(&body, page, self.per_page));

        let _render = self.render_lock.lock().unwrap_or_else(|e| e.into_inner());
        {
            let mut state = self.lock();
            if state.generation != generation || token.is_cancelled() {
                debug!(endpoint = %self.endpoint, page, "load superseded");
                return LoadOutcome::Superseded;
            }
            state.in_flight = None;
            if let Ok(result) = &result {
                state.last_meta = Some(result.meta);
            }
        }

        match result {
            Ok(result) => {
                debug!(
                    endpoint = %self.endpoint,
                    rows = result.items.len(),
                    total = result.meta.total,
                    "page loaded"
                );
                self.view.render_rows(&result.items);
                self.view.render_pagination(&result.meta);
                LoadOutcome::Rendered(result)
            }
            Err(e) if e.is_cancelled() => LoadOutcome::Superseded,
            Err(e) => {
                warn!(endpoint = %self.endpoint, page, error = %e, "load failed");
                self.view.show_error(&e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Load the remembered page with the remembered filters.
    pub async fn reload(&self) -> LoadOutcome {
        let (page, filters) = {
            let state = self.lock();
            (state.page, state.filters.clone())
        };
        self.load(page, &filters).await
    }

    /// Apply new filters, starting over at page 1.
    pub async fn apply_filters(&self, filters: FilterSet) -> LoadOutcome {
        self.load(1, &filters).await
    }

    /// Clear all filters, starting over at page 1.
    pub async fn reset_filters(&self) -> LoadOutcome {
        self.load(1, &FilterSet::new()).await
    }

    /// Load a page with the remembered filters.
    pub async fn go_to(&self, page: u64) -> LoadOutcome {
        let filters = self.filters();
        self.load(page, &filters).await
    }

    /// Cancel the outstanding load, if any, without starting another.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if let Some(token) = state.in_flight.take() {
            token.cancel();
        }
        state.generation += 1;
    }

    pub fn current_page(&self) -> u64 {
        self.lock().page
    }

    pub fn filters(&self) -> FilterSet {
        self.lock().filters.clone()
    }

    pub fn last_meta(&self) -> Option<PaginationInfo> {
        self.lock().last_meta
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }
}

impl std::fmt::Debug for PaginatedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedLoader")
            .field("endpoint", &self.endpoint)
            .field("paging", &self.paging)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}
