pub mod endpoints;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{PanelError, Result};
use crate::utils::{de_opt_bool, value_to_bool};

/// Body of a mutating call: `{ success, data?, message? }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "de_message")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Interpret the body. An explicit `success: false` is an application
    /// failure; a 2xx body without the flag counts as success.
    pub fn into_result(self) -> Result<Self> {
        if self.success == Some(false) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(PanelError::Application(message));
        }
        Ok(self)
    }
}

/// HTTP client wrapper for the admin REST API.
///
/// Every request carries `X-Requested-With: XMLHttpRequest`; mutating
/// requests also carry the CSRF token. Cookies persist across requests.
#[derive(Debug, Clone)]
pub struct PanelHttpClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl PanelHttpClient {
    pub fn new(base_url: &str, csrf_token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token,
        })
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// GET a JSON document. A body with `success: false` is an error.
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let resp = self.client.get(&url).query(query).send().await?;
        let body = read_json(resp).await?;
        if body.get("success").and_then(value_to_bool) == Some(false) {
            return Err(PanelError::Application(message_of(&body).unwrap_or_else(
                || "API request failed".to_string(),
            )));
        }
        Ok(body)
    }

    /// Like [`get_json`](Self::get_json), but resolves to
    /// [`PanelError::Cancelled`] as soon as `cancel` fires.
    pub async fn get_json_cancellable(
        &self,
        path: &str,
        query: &[(String, String)],
        cancel: &CancellationToken,
    ) -> Result<Value> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PanelError::Cancelled),
            res = self.get_json(path, query) => res,
        }
    }

    /// POST/PUT a JSON body.
    pub async fn send_json(&self, method: Method, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!(%method, %url, "sending JSON");
        let req = self.mutating(method, &url).json(body);
        into_api_response(req.send().await?).await
    }

    /// Send a multipart form.
    pub async fn send_multipart(&self, method: Method, path: &str, form: Form) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!(%method, %url, "sending multipart");
        let req = self.mutating(method, &url).multipart(form);
        into_api_response(req.send().await?).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!(%url, ?query, "DELETE");
        let req = self.mutating(Method::DELETE, &url).query(query);
        into_api_response(req.send().await?).await
    }

    fn mutating(&self, method: Method, url: &str) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.csrf_token {
            Some(token) => req.header("X-CSRF-Token", token),
            None => req,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn into_api_response(resp: Response) -> Result<ApiResponse> {
    let body = read_json(resp).await?;
    if body.is_null() {
        return Ok(ApiResponse::default());
    }
    if !body.is_object() {
        return Ok(ApiResponse {
            data: Some(body),
            ..Default::default()
        });
    }
    let parsed: ApiResponse = serde_json::from_value(body)?;
    parsed.into_result()
}

/// Check the status, then parse the body. An empty 2xx body is `null`.
async fn read_json(resp: Response) -> Result<Value> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(PanelError::Unauthorized);
    }

    let text = resp.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| message_of(&body))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(PanelError::Http {
            status: status.as_u16(),
            message,
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

fn message_of(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|k| body.get(*k).and_then(message_text))
}

/// Text of a `message`/`error` value. Field-error maps and lists are
/// joined, e.g. `{"slug": ["taken"]}` becomes `slug: taken`.
fn message_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(message_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(fields) => fields
            .iter()
            .filter_map(|(field, v)| message_text(v).map(|text| format!("{field}: {text}")))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn de_message<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(message_text))
}
