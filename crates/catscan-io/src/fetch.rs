//! Classification requests via the browser Fetch API.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::future::Future;

use catscan_core::{ClassifyError, HttpReply, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{RequestInit, RequestMode};

/// Errors that can occur while performing a `fetch`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or a required object was missing.
    #[error("{0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        // `fetch` rejects with a `TypeError`; its message is the useful part.
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        Self::JsError(message)
    }
}

/// [`Transport`] that POSTs JSON to a fixed endpoint with `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    /// Create a transport for `endpoint` (absolute or page-relative URL).
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// The URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for FetchTransport {
    fn send(&self, body: String) -> impl Future<Output = Result<HttpReply, ClassifyError>> {
        let endpoint = self.endpoint.clone();
        async move {
            post_json(&endpoint, &body)
                .await
                .map_err(|e| ClassifyError::Transport(e.to_string()))
        }
    }
}

/// POST `body` as `application/json` and read the reply as text.
///
/// Non-2xx statuses are returned as replies, not errors.
///
/// # Errors
///
/// Returns [`FetchError::JsError`] if there is no window, the request
/// cannot be built, the network request fails, or the body cannot be
/// read.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Response is !Send
pub async fn post_json(endpoint: &str, body: &str) -> Result<HttpReply, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(body));

    let request = web_sys::Request::new_with_str_and_init(endpoint, &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|_| FetchError::JsError("fetch did not resolve to a Response".into()))?;

    let status = response.status();
    let text = JsFuture::from(response.text()?).await?;
    tracing::debug!(status, endpoint, "classifier replied");

    Ok(HttpReply {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}
