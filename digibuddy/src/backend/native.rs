use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;

use super::{decode_buildings, decode_route, Backend, RouteRequest, RouteShape};
use super::{BUILDINGS_PATH, ROUTE_PATH};
use crate::error::DigibuddyError;
use crate::feature_store::RawFeature;

/// Backend client using `reqwest`.
#[derive(Debug, Clone)]
pub struct NativeHttpBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl NativeHttpBackend {
    /// Creates a client for the server at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DigibuddyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("digibuddy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read_response(response: reqwest::Response) -> Result<Bytes, DigibuddyError> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().clone();
            log::info!(
                "Request to {url} failed: {status}, {:?}",
                response.text().await
            );
            return Err(DigibuddyError::Http(format!("HTTP error! status: {status}")));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl Backend for NativeHttpBackend {
    async fn fetch_buildings(&self) -> Result<Vec<RawFeature>, DigibuddyError> {
        let url = self.url(BUILDINGS_PATH);
        log::debug!("Loading building data from {url}");

        let result = async {
            let response = self.http_client.get(&url).send().await?;
            Self::read_response(response).await
        }
        .await;

        let body = result.map_err(|err| DigibuddyError::FetchFailed(err.to_string()))?;
        decode_buildings(&body)
    }

    async fn get_route(&self, request: &RouteRequest) -> Result<RouteShape, DigibuddyError> {
        let url = self.url(ROUTE_PATH);
        log::debug!("Requesting route {request:?}");

        let result = async {
            let body = serde_json::to_vec(request)?;
            let response = self
                .http_client
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            Self::read_response(response).await
        }
        .await;

        let body = result.map_err(|err| DigibuddyError::RouteCalculationFailed(err.to_string()))?;
        decode_route(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash() {
        let backend = NativeHttpBackend::new("http://localhost:5000/").expect("client builds");
        assert_eq!(backend.url(BUILDINGS_PATH), "http://localhost:5000/buildings");
        assert_eq!(backend.url(ROUTE_PATH), "http://localhost:5000/get_route");
    }
}
