//! Recording views and notifier shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use panel_client::{
    FormView, Notification, Notifier, PageView, PaginationInfo, PanelConfig, PanelError, TabView,
};
use serde_json::Value;
use wiremock::MockServer;

pub fn config_for(server: &MockServer) -> PanelConfig {
    let mut config = PanelConfig::new(server.uri());
    config.csrf_token = Some("csrf-test-token".into());
    config
}

#[derive(Default)]
pub struct RecordingView {
    pub loading: AtomicUsize,
    pub rows: Mutex<Vec<Vec<Value>>>,
    pub metas: Mutex<Vec<PaginationInfo>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingView {
    pub fn render_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn last_ids(&self) -> Vec<u64> {
        self.rows
            .lock()
            .unwrap()
            .last()
            .map(|rows| rows.iter().filter_map(|r| r["id"].as_u64()).collect())
            .unwrap_or_default()
    }

    pub fn last_meta(&self) -> Option<PaginationInfo> {
        self.metas.lock().unwrap().last().copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

impl PageView for RecordingView {
    fn show_loading(&self) {
        self.loading.fetch_add(1, Ordering::SeqCst);
    }

    fn render_rows(&self, items: &[Value]) {
        self.rows.lock().unwrap().push(items.to_vec());
    }

    fn render_pagination(&self, meta: &PaginationInfo) {
        self.metas.lock().unwrap().push(*meta);
    }

    fn show_error(&self, error: &PanelError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingForm {
    pub closed: AtomicUsize,
    pub busy_toggles: Mutex<Vec<bool>>,
}

impl FormView for RecordingForm {
    fn close_form(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn set_busy(&self, busy: bool) {
        self.busy_toggles.lock().unwrap().push(busy);
    }
}

#[derive(Default)]
pub struct RecordingTabs {
    pub visible: Mutex<Vec<(String, bool)>>,
}

impl RecordingTabs {
    /// Names whose most recent visibility call was `true`.
    pub fn visible_panels(&self) -> Vec<String> {
        let calls = self.visible.lock().unwrap();
        let mut latest: Vec<(String, bool)> = Vec::new();
        for (name, visible) in calls.iter() {
            match latest.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = *visible,
                None => latest.push((name.clone(), *visible)),
            }
        }
        latest
            .into_iter()
            .filter(|(_, visible)| *visible)
            .map(|(name, _)| name)
            .collect()
    }
}

impl TabView for RecordingTabs {
    fn set_panel_visible(&self, tab: &str, visible: bool) {
        self.visible.lock().unwrap().push((tab.to_string(), visible));
    }
}
