use crate::error::HelpdeskError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// Password Freshservice expects alongside an API key in basic auth.
const API_KEY_PASSWORD: &str = "X";

/// Status code and body text of a helpdesk response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HelpdeskError> {
        let mut deserializer = serde_json::Deserializer::from_str(&self.body);
        let value = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| HelpdeskError::Decode(e.to_string()))?;
        deserializer
            .end()
            .map_err(|e| HelpdeskError::Decode(e.to_string()))?;
        Ok(value)
    }
}

/// Thin reqwest wrapper that authenticates every request with the API key.
///
/// Non-2xx responses are not errors here; callers branch on the status.
#[derive(Clone)]
pub struct FreshserviceClient {
    http: Client,
    api_key: String,
}

impl FreshserviceClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, HelpdeskError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
        })
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<ApiResponse, HelpdeskError> {
        self.send(self.http.post(url).json(body)).await
    }

    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, HelpdeskError> {
        self.send(self.http.get(url).query(query)).await
    }

    pub async fn delete(&self, url: &str) -> Result<ApiResponse, HelpdeskError> {
        self.send(self.http.delete(url)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse, HelpdeskError> {
        let response = request
            .basic_auth(&self.api_key, Some(API_KEY_PASSWORD))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Freshservice Response: {:?}", body);

        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for FreshserviceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshserviceClient")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
