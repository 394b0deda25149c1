//! Create/update/delete against one resource endpoint.
//!
//! A successful mutation closes the form, posts a success notification and
//! reloads the current page of the bound loader exactly once. Failures only
//! produce an error notification; nothing is updated optimistically.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{PanelError, Result};
use crate::i18n::Translations;
use crate::loader::PaginatedLoader;
use crate::notify::{Notification, NotificationLevel, Notifier, DEFAULT_DURATION};
use crate::rest::{ApiResponse, PanelHttpClient};

/// Field values collected from a form, plus the id of the record being
/// edited (none when creating).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    id: Option<u64>,
    fields: Map<String, Value>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form for editing the record `id`.
    pub fn editing(id: u64) -> Self {
        Self {
            id: Some(id),
            fields: Map::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Names from `required` whose value is absent, null or blank.
    pub fn missing_fields(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|name| match self.fields.get(name.as_str()) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .cloned()
            .collect()
    }
}

/// Wire encoding of create/update bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    #[default]
    Json,
    /// `multipart/form-data`, for forms carrying files.
    Multipart,
}

/// How a record id is addressed on update and delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStyle {
    /// Collection URL; `?id=n` on delete, `id` in the body on update.
    #[default]
    QueryParam,
    /// `{endpoint}/{id}`.
    PathSegment,
}

/// Notification texts for successful mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrudMessages {
    pub created: String,
    pub updated: String,
    pub deleted: String,
}

impl Default for CrudMessages {
    fn default() -> Self {
        Self {
            created: "Created successfully".to_string(),
            updated: "Updated successfully".to_string(),
            deleted: "Deleted successfully".to_string(),
        }
    }
}

impl CrudMessages {
    /// Texts from the `messages.*` keys, English when missing.
    pub fn from_translations(tr: &Translations) -> Self {
        let d = Self::default();
        Self {
            created: tr.t("messages.created", Some(&d.created)),
            updated: tr.t("messages.updated", Some(&d.updated)),
            deleted: tr.t("messages.deleted", Some(&d.deleted)),
        }
    }
}

/// Form callbacks.
pub trait FormView: Send + Sync {
    fn close_form(&self);

    /// Toggled around the request, e.g. to disable the submit button.
    fn set_busy(&self, _busy: bool) {}
}

pub struct CrudController {
    http_client: PanelHttpClient,
    endpoint: String,
    required_fields: Vec<String>,
    encoding: BodyEncoding,
    id_style: IdStyle,
    emulate_put: bool,
    messages: CrudMessages,
    notification_duration: Duration,
    loader: Arc<PaginatedLoader>,
    form: Arc<dyn FormView>,
    notifier: Arc<dyn Notifier>,
}

impl CrudController {
    pub fn new(
        http_client: PanelHttpClient,
        endpoint: impl Into<String>,
        loader: Arc<PaginatedLoader>,
        form: Arc<dyn FormView>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            required_fields: Vec::new(),
            encoding: BodyEncoding::Json,
            id_style: IdStyle::QueryParam,
            emulate_put: false,
            messages: CrudMessages::default(),
            notification_duration: DEFAULT_DURATION,
            loader,
            form,
            notifier,
        }
    }

    pub fn with_required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_id_style(mut self, id_style: IdStyle) -> Self {
        self.id_style = id_style;
        self
    }

    /// Send updates as POST with `_method=PUT`.
    pub fn with_put_emulation(mut self, emulate_put: bool) -> Self {
        self.emulate_put = emulate_put;
        self
    }

    pub fn with_messages(mut self, messages: CrudMessages) -> Self {
        self.messages = messages;
        self
    }

    /// How long the notifications this controller posts stay up.
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate and send the form: POST without a stored id, PUT with one.
    pub async fn submit(&self, form: &FormData) -> Result<ApiResponse> {
        let missing = form.missing_fields(&self.required_fields);
        if !missing.is_empty() {
            let err = PanelError::Validation(missing);
            warn!(endpoint = %self.endpoint, error = %err, "form rejected");
            self.notify(Notification::from_error(&err));
            return Err(err);
        }

        self.form.set_busy(true);
        let result = self.send(form).await;
        self.form.set_busy(false);

        match result {
            Ok(resp) => {
                info!(endpoint = %self.endpoint, id = ?form.id(), "record saved");
                self.form.close_form();
                let text = if form.is_update() {
                    &self.messages.updated
                } else {
                    &self.messages.created
                };
                self.notify(Notification::new(NotificationLevel::Success, text.as_str()));
                self.loader.reload().await;
                Ok(resp)
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, id = ?form.id(), error = %e, "save failed");
                self.notify(Notification::from_error(&e));
                Err(e)
            }
        }
    }

    /// Delete the record `id`, then reload the current page.
    pub async fn delete(&self, id: u64) -> Result<ApiResponse> {
        let result = match self.id_style {
            IdStyle::QueryParam => {
                self.http_client
                    .delete(&self.endpoint, &[("id".to_string(), id.to_string())])
                    .await
            }
            IdStyle::PathSegment => self.http_client.delete(&self.member_path(id), &[]).await,
        };

        match result {
            Ok(resp) => {
                info!(endpoint = %self.endpoint, id, "record deleted");
                self.notify(Notification::new(
                    NotificationLevel::Success,
                    self.messages.deleted.as_str(),
                ));
                self.loader.reload().await;
                Ok(resp)
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, id, error = %e, "delete failed");
                self.notify(Notification::from_error(&e));
                Err(e)
            }
        }
    }

    async fn send(&self, form: &FormData) -> Result<ApiResponse> {
        let mut fields = form.fields.clone();
        let (method, path) = match form.id {
            None => (Method::POST, self.endpoint.clone()),
            Some(id) => {
                let path = match self.id_style {
                    IdStyle::QueryParam => {
                        fields.insert("id".to_string(), Value::from(id));
                        self.endpoint.clone()
                    }
                    IdStyle::PathSegment => self.member_path(id),
                };
                if self.emulate_put {
                    fields.insert("_method".to_string(), Value::from("PUT"));
                    (Method::POST, path)
                } else {
                    (Method::PUT, path)
                }
            }
        };

        match self.encoding {
            BodyEncoding::Json => {
                self.http_client
                    .send_json(method, &path, &Value::Object(fields))
                    .await
            }
            BodyEncoding::Multipart => {
                self.http_client
                    .send_multipart(method, &path, multipart_form(&fields))
                    .await
            }
        }
    }

    fn notify(&self, notification: Notification) {
        self.notifier
            .notify(notification.with_duration(self.notification_duration));
    }

    fn member_path(&self, id: u64) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), id)
    }
}

impl std::fmt::Debug for CrudController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudController")
            .field("endpoint", &self.endpoint)
            .field("encoding", &self.encoding)
            .field("id_style", &self.id_style)
            .field("emulate_put", &self.emulate_put)
            .finish_non_exhaustive()
    }
}

/// Text parts for each field. Nulls are skipped, bools become `1`/`0`,
/// nested values are sent as JSON text.
fn multipart_form(fields: &Map<String, Value>) -> Form {
    fields.iter().fold(Form::new(), |form, (name, value)| {
        let text = match value {
            Value::Null => return form,
            Value::String(s) => s.clone(),
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        };
        form.text(name.clone(), text)
    })
}
