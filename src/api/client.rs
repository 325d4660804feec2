//! # API Client
//!
//! Thin typed layer over a [`Transport`]: issues one request, turns non-2xx
//! responses into [`ApiError::Remote`] and decodes JSON bodies.

use super::error::{extract_remote_message, ApiError};
use super::request::{ApiPath, ApiRequest, ApiResponse, FormData, RequestBody};
use super::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Cloneable handle shared by every resource client.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `request` and fails on any non-2xx status.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.to_string();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(%method, %path, status = response.status, "Remote request failed");
            return Err(ApiError::Remote {
                status: response.status,
                message: extract_remote_message(&response.body),
            });
        }
        debug!(%method, %path, status = response.status, "Remote request succeeded");
        Ok(response)
    }

    /// Sends `request` and decodes the body as `T`.
    ///
    /// An empty body decodes as JSON `null`, so `Option<T>` targets read it as
    /// `None`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        decode(&response.body)
    }

    /// Sends `request` and ignores whatever the server answered with.
    pub async fn acknowledge(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: ApiPath) -> Result<T, ApiError> {
        self.fetch(ApiRequest::get(path)).await
    }

    pub async fn post_json<B, T>(&self, path: ApiPath, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.fetch(ApiRequest::post(path, RequestBody::Json(body)))
            .await
    }

    /// Posts a JSON body where only the status of the answer matters.
    pub async fn submit_json<B>(&self, path: ApiPath, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.acknowledge(ApiRequest::post(path, RequestBody::Json(body)))
            .await
    }

    pub async fn post_form(&self, path: ApiPath, form: FormData) -> Result<(), ApiError> {
        self.acknowledge(ApiRequest::post(path, RequestBody::Multipart(form)))
            .await
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = body.trim();
    let body = if body.is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_non_success_becomes_remote_error() {
        let mock = MockTransport::new();
        mock.expect(HttpMethod::Get, "/Brand/Get-Brand")
            .respond_status(400, r#"{"message":"Bad filter"}"#);

        let api = ApiClient::new(mock.transport());
        let result: Result<Vec<serde_json::Value>, _> =
            api.get_json(ApiPath::new(["Brand", "Get-Brand"])).await;

        assert_eq!(
            result,
            Err(ApiError::Remote {
                status: 400,
                message: Some("Bad filter".into())
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_none() {
        let mock = MockTransport::new();
        mock.expect(HttpMethod::Get, "/Order/SalesOrderGet/42")
            .respond_empty();

        let api = ApiClient::new(mock.transport());
        let order: Option<serde_json::Value> = api
            .get_json(ApiPath::new(["Order", "SalesOrderGet", "42"]))
            .await
            .unwrap();
        assert_eq!(order, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mock = MockTransport::new();
        mock.expect(HttpMethod::Get, "/Brand/Get-Brand")
            .respond_json(json!({"not": "a list"}));

        let api = ApiClient::new(mock.transport());
        let result: Result<Vec<String>, _> =
            api.get_json(ApiPath::new(["Brand", "Get-Brand"])).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
