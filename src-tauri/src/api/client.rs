//! HTTP transport to the inventory backend

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::Envelope;

/// Error body returned by the backend on non-2xx responses
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let req = self.authorize(self.client.get(self.url(path)));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let req = self.authorize(self.client.get(self.url(path)).query(query));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "POST");
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        tracing::debug!(path, "PUT");
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    /// DELETE; the body, if any, is discarded.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        tracing::debug!(path, "DELETE");
        let req = self.authorize(self.client.delete(self.url(path)));
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::error_for(status, text));
        }
        Ok(())
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_for(status, text));
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn error_for(status: StatusCode, text: String) -> ApiError {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error));
        match (status, message) {
            (StatusCode::UNAUTHORIZED, _) => ApiError::Unauthorized,
            (_, Some(message)) => ApiError::Api {
                status: status.as_u16(),
                message,
            },
            (StatusCode::NOT_FOUND, None) => ApiError::NotFound(text),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, None) => {
                ApiError::Validation(text)
            }
            (_, None) => ApiError::Server(text),
        }
    }
}

/// Unwrap a `{ success, data, message }` envelope.
pub(crate) fn into_data<T>(envelope: Envelope<T>) -> ApiResult<T> {
    if !envelope.success {
        return Err(ApiError::Api {
            status: 200,
            message: envelope
                .message
                .unwrap_or_else(|| "Request was not successful".to_string()),
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::InvalidResponse("Missing data".into()))
}
