use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    availability_path, block_dates_path, unblock_dates_path, ApiError, AvailabilityBackend,
    AvailabilityChangeResponse, AvailabilityResponse, BlockDatesRequest, UnblockDatesRequest,
};

/// API client for the rental site's availability endpoints
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client talking to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Status { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AvailabilityBackend for ApiClient {
    async fn fetch_availability(&self, item_id: u64) -> Result<AvailabilityResponse, ApiError> {
        let url = self.url(&availability_path(item_id));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn block_dates(
        &self,
        item_id: u64,
        request: &BlockDatesRequest,
    ) -> Result<AvailabilityChangeResponse, ApiError> {
        let url = self.url(&block_dates_path(item_id));

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn unblock_dates(
        &self,
        item_id: u64,
        request: &UnblockDatesRequest,
    ) -> Result<AvailabilityChangeResponse, ApiError> {
        let url = self.url(&unblock_dates_path(item_id));

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_base_url_joins_paths() {
        let client = ApiClient::with_base_url("https://rent.example/".to_string());
        assert_eq!(client.url("/item/42/availability"), "https://rent.example/item/42/availability");
        assert_eq!(ApiClient::new().url("/block-date/42"), "/block-date/42");
    }
}
