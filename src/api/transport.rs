//! # HTTP Transport
//!
//! The seam between operations and the network. [`HttpTransport`] talks to the
//! real backend with `reqwest`; tests use
//! [`MockTransport`](super::mock::MockTransport).

use super::error::ApiError;
use super::request::{ApiPath, ApiRequest, ApiResponse, FormData, HttpMethod, RequestBody};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use std::time::Duration;
use tracing::{debug, instrument};

/// Sends one request and returns the raw response.
///
/// Implementations must perform exactly one round trip per call and must not
/// retry. Only failures that prevent a response from arriving are errors;
/// non-2xx statuses come back as an `ApiResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport bound to the configured base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Transport(format!("Invalid API base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "API base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn url_for(&self, path: &ApiPath) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(path.segments());
        Ok(url)
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn multipart(form: FormData) -> Result<Form, ApiError> {
    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }
    for file in form.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        multipart = multipart.part(file.field, part);
    }
    Ok(multipart)
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        let builder = self.client.request(method(request.method), url);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(multipart(form)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Response received");

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_appends_encoded_segments() {
        let transport = transport("https://shop.example.com/api/");
        let url = transport
            .url_for(&ApiPath::new(["Users", "LogIn", "01711 000000", "p@ss/word"]))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example.com/api/Users/LogIn/01711%20000000/p@ss%2Fword"
        );
    }

    #[test]
    fn test_url_for_without_trailing_slash() {
        let transport = transport("https://shop.example.com/api");
        let url = transport
            .url_for(&ApiPath::new(["Product", "Product-Get"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/Product/Product-Get");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpTransport::new(&ApiConfig {
            base_url: "not a url".to_string(),
            request_timeout_secs: None,
        });
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
