//! Integration tests for the create/update/delete cycle.
//!
//! Every successful mutation must close the form, notify, and reload the
//! bound loader exactly once; failures only notify.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::{config_for, RecordingForm, RecordingNotifier, RecordingView};
use panel_client::{
    BodyEncoding, Brand, CrudController, ErrorKind, FilterSet, FormData, IdStyle,
    NotificationLevel, PaginatedLoader, Panel, TenantUser,
};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    panel: Panel,
    view: Arc<RecordingView>,
    form: Arc<RecordingForm>,
    notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    fn new(server: &MockServer) -> Self {
        Self {
            panel: Panel::new(config_for(server)).unwrap(),
            view: Arc::new(RecordingView::default()),
            form: Arc::new(RecordingForm::default()),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    fn brand_loader(&self) -> Arc<PaginatedLoader> {
        Arc::new(self.panel.loader::<Brand>(self.view.clone()))
    }

    fn brands(&self) -> CrudController {
        self.panel
            .crud::<Brand>(self.brand_loader(), self.form.clone(), self.notifier.clone())
    }
}

async fn mount_brand_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/brands"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 1, "slug": "acme" }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_posts_once_then_reloads_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(header("X-CSRF-Token", "csrf-test-token"))
        .and(body_json(json!({ "slug": "acme", "name": "Acme" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "success": true, "data": { "id": 1 } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 1).await;

    let fx = Fixture::new(&server);
    let form = FormData::new().with("slug", "acme").with("name", "Acme");
    let resp = fx.brands().submit(&form).await.unwrap();

    assert_eq!(resp.success, Some(true));
    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 1);
    assert_eq!(*fx.form.busy_toggles.lock().unwrap(), vec![true, false]);
    let notes = fx.notifier.all();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert_eq!(notes[0].message, "Created successfully");
    assert_eq!(fx.view.render_count(), 1);
}

#[tokio::test]
async fn test_notifications_carry_configured_duration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": "1" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 1).await;

    let mut config = config_for(&server);
    config.notification_duration = Duration::from_secs(5);
    let panel = Panel::new(config).unwrap();
    let view = Arc::new(RecordingView::default());
    let form = Arc::new(RecordingForm::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let brands = panel.crud::<Brand>(
        Arc::new(panel.loader::<Brand>(view.clone())),
        form.clone(),
        notifier.clone(),
    );

    let resp = brands.submit(&FormData::new().with("slug", "acme")).await.unwrap();
    assert_eq!(resp.success, Some(true));
    let _ = brands.submit(&FormData::new()).await.unwrap_err();

    let notes = notifier.all();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].level, NotificationLevel::Success);
    assert_eq!(notes[1].level, NotificationLevel::Error);
    assert!(notes.iter().all(|n| n.duration == Duration::from_secs(5)));
    assert_eq!(form.closed.load(Ordering::SeqCst), 1);
    assert_eq!(view.render_count(), 1);
}

#[tokio::test]
async fn test_update_puts_to_member_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tenant_users/5"))
        .and(body_json(json!({ "tenant_id": 2, "user_id": 9, "role_id": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tenant_users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let fx = Fixture::new(&server);
    let loader = Arc::new(fx.panel.loader::<TenantUser>(fx.view.clone()));
    let crud = fx
        .panel
        .crud::<TenantUser>(loader, fx.form.clone(), fx.notifier.clone())
        .with_id_style(IdStyle::PathSegment);

    let form = FormData::editing(5)
        .with("tenant_id", 2)
        .with("user_id", 9)
        .with("role_id", 3);
    crud.submit(&form).await.unwrap();

    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 1);
    assert_eq!(fx.notifier.all()[0].message, "Updated successfully");
}

#[tokio::test]
async fn test_update_with_put_emulation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .and(body_json(json!({ "slug": "acme", "id": 4, "_method": "PUT" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(405))
        .expect(0)
        .mount(&server)
        .await;
    mount_brand_list(&server, 1).await;

    let fx = Fixture::new(&server);
    let crud = fx.brands().with_put_emulation(true);
    crud.submit(&FormData::editing(4).with("slug", "acme"))
        .await
        .unwrap();

    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_multipart_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"slug\""))
        .and(body_string_contains("acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 1).await;

    let fx = Fixture::new(&server);
    let crud = fx.brands().with_encoding(BodyEncoding::Multipart);
    crud.submit(&FormData::new().with("slug", "acme").with("is_active", true))
        .await
        .unwrap();

    assert_eq!(fx.view.render_count(), 1);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_required_field_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_brand_list(&server, 0).await;

    let fx = Fixture::new(&server);
    let err = fx
        .brands()
        .submit(&FormData::new().with("slug", " ").with("name", "Acme"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "missing required fields: slug");
    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 0);
    let notes = fx.notifier.all();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Warning);
}

#[tokio::test]
async fn test_server_rejection_notifies_without_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "error": "Slug already exists" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 0).await;

    let fx = Fixture::new(&server);
    let err = fx
        .brands()
        .submit(&FormData::new().with("slug", "acme"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 0);
    let notes = fx.notifier.all();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert!(notes[0].message.contains("Slug already exists"));
    assert_eq!(fx.view.render_count(), 0);
}

#[tokio::test]
async fn test_success_false_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "message": "Quota exceeded" })),
        )
        .mount(&server)
        .await;
    mount_brand_list(&server, 0).await;

    let fx = Fixture::new(&server);
    let err = fx
        .brands()
        .submit(&FormData::new().with("slug", "acme"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 0);
    assert_eq!(fx.notifier.all()[0].level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_string_success_flag_and_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": "false",
            "message": { "slug": ["has already been taken"] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 0).await;

    let fx = Fixture::new(&server);
    let err = fx
        .brands()
        .submit(&FormData::new().with("slug", "acme"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.to_string(), "request failed: slug: has already been taken");
    let notes = fx.notifier.all();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(fx.form.closed.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_by_query_param_reloads_current_page() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/brands"))
        .and(query_param("id", "4"))
        .and(header("X-CSRF-Token", "csrf-test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/brands"))
        .and(query_param("page", "2"))
        .and(query_param("search", "ac"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let fx = Fixture::new(&server);
    let loader = fx.brand_loader();
    loader
        .load(2, &FilterSet::new().with("search", "ac"))
        .await;
    let crud = fx
        .panel
        .crud::<Brand>(loader.clone(), fx.form.clone(), fx.notifier.clone());

    crud.delete(4).await.unwrap();

    assert_eq!(loader.current_page(), 2);
    assert_eq!(fx.view.render_count(), 2);
    assert_eq!(fx.notifier.all()[0].message, "Deleted successfully");
}

#[tokio::test]
async fn test_delete_by_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/brands/8"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_brand_list(&server, 1).await;

    let fx = Fixture::new(&server);
    fx.brands()
        .with_id_style(IdStyle::PathSegment)
        .delete(8)
        .await
        .unwrap();

    assert_eq!(fx.notifier.all()[0].level, NotificationLevel::Success);
}
