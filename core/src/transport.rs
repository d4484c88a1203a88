//! The network seam.
//!
//! `Transport` performs exactly one HTTP exchange per call. It owns any
//! timeout or TLS policy; the client adds none of its own.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` and return the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;
    use reqwest::redirect::Policy;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by a `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Transport over a client from [`ReqwestTransport::client_builder`].
        pub fn new() -> Result<Self, ApiError> {
            Ok(Self::with_client(Self::client_builder().build()?))
        }

        /// Builder with redirects disabled, so every call is exactly one
        /// exchange and a 3xx reaches status validation.
        pub fn client_builder() -> reqwest::ClientBuilder {
            reqwest::Client::builder().redirect(Policy::none())
        }

        /// Use a preconfigured client, e.g. one with timeouts or DNS overrides.
        /// Start from [`ReqwestTransport::client_builder`] to keep redirects off.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn to_reqwest(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = self
                .client
                .request(to_reqwest(request.method), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.multipart(body.into_multipart());
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
            })
        }
    }
}
