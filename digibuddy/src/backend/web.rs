//! Backend client for wasm32 targets, using the browser `fetch` API.

use async_trait::async_trait;
use bytes::Bytes;
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{decode_buildings, decode_route, Backend, RouteRequest, RouteShape};
use super::{BUILDINGS_PATH, ROUTE_PATH};
use crate::error::DigibuddyError;
use crate::feature_store::RawFeature;

/// Backend client using `window.fetch`.
#[derive(Debug, Clone)]
pub struct WebHttpBackend {
    base_url: String,
}

impl WebHttpBackend {
    /// Creates a client for the server at `base_url`. An empty string targets the origin
    /// the page was served from.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DigibuddyError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, path: &str, body: Option<String>) -> Result<Bytes, DigibuddyError> {
        let url = format!("{}{path}", self.base_url);

        let opts = RequestInit::new();
        opts.set_mode(RequestMode::Cors);
        match &body {
            Some(body) => {
                opts.set_method("POST");
                opts.set_body(&JsValue::from_str(body));
            }
            None => opts.set_method("GET"),
        }

        let request = Request::new_with_str_and_init(&url, &opts)?;
        if body.is_some() {
            request.headers().set("Content-Type", "application/json")?;
        }

        let window = web_sys::window()
            .ok_or_else(|| DigibuddyError::Wasm(Some("Global window is not available".into())))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;

        if !response.ok() {
            return Err(DigibuddyError::Http(format!(
                "HTTP error! status: {}",
                response.status()
            )));
        }

        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(Uint8Array::new(&buffer).to_vec().into())
    }
}

#[async_trait(?Send)]
impl Backend for WebHttpBackend {
    async fn fetch_buildings(&self) -> Result<Vec<RawFeature>, DigibuddyError> {
        let body = self
            .fetch(BUILDINGS_PATH, None)
            .await
            .map_err(|err| DigibuddyError::FetchFailed(err.to_string()))?;
        decode_buildings(&body)
    }

    async fn get_route(&self, request: &RouteRequest) -> Result<RouteShape, DigibuddyError> {
        let payload = serde_json::to_string(request)?;
        let body = self
            .fetch(ROUTE_PATH, Some(payload))
            .await
            .map_err(|err| DigibuddyError::RouteCalculationFailed(err.to_string()))?;
        decode_route(&body)
    }
}
