use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{PanelError, Result};
use crate::loader::{LoadOutcome, PaginatedLoader};

/// Panel visibility callbacks for a tabbed page.
pub trait TabView: Send + Sync {
    fn set_panel_visible(&self, tab: &str, visible: bool);

    fn set_tab_active(&self, _tab: &str, _active: bool) {}
}

struct Tab {
    name: String,
    loader: Arc<PaginatedLoader>,
}

/// Tabs of one page. Each tab owns a loader that remembers its own page and
/// filters; switching is unconditional and idempotent.
pub struct TabMachine {
    tabs: Vec<Tab>,
    active: Mutex<Option<String>>,
    view: Arc<dyn TabView>,
}

impl TabMachine {
    pub fn new(view: Arc<dyn TabView>) -> Self {
        Self {
            tabs: Vec::new(),
            active: Mutex::new(None),
            view,
        }
    }

    /// Register a tab. Re-registering a name replaces its loader.
    pub fn with_tab(mut self, name: impl Into<String>, loader: Arc<PaginatedLoader>) -> Self {
        let name = name.into();
        match self.tabs.iter_mut().find(|t| t.name == name) {
            Some(tab) => tab.loader = loader,
            None => self.tabs.push(Tab { name, loader }),
        }
        self
    }

    pub fn tab_names(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn active(&self) -> Option<String> {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn loader(&self, name: &str) -> Option<&Arc<PaginatedLoader>> {
        self.tabs.iter().find(|t| t.name == name).map(|t| &t.loader)
    }

    /// Make `name` the active tab, show only its panel and load it at its
    /// remembered page.
    pub async fn switch_to(&self, name: &str) -> Result<LoadOutcome> {
        let loader = self
            .loader(name)
            .cloned()
            .ok_or_else(|| PanelError::NotFound(format!("tab {name}")))?;

        *self.active.lock().unwrap_or_else(|e| e.into_inner()) = Some(name.to_string());
        for tab in &self.tabs {
            let is_target = tab.name == name;
            self.view.set_tab_active(&tab.name, is_target);
            self.view.set_panel_visible(&tab.name, is_target);
        }

        debug!(tab = name, page = loader.current_page(), "switching tab");
        Ok(loader.reload().await)
    }

    /// Reload the active tab, if any.
    pub async fn refresh_active(&self) -> Option<LoadOutcome> {
        let name = self.active()?;
        let loader = self.loader(&name)?.clone();
        Some(loader.reload().await)
    }
}

impl std::fmt::Debug for TabMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabMachine")
            .field("tabs", &self.tab_names())
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}
