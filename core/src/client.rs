//! Request dispatch for the Backlog API.
//!
//! # Design
//! `BacklogClient` holds only its configuration and a shared `Transport`, and
//! carries no mutable state between calls. Every operation goes through one
//! path:
//!
//! 1. `build_request` resolves the route's path, places the parameters in the
//!    query or the body according to the route's `ParamKind`, and appends the
//!    API key;
//! 2. the transport performs exactly one exchange;
//! 3. `parse_response` checks the status and decodes the JSON body.
//!
//! Steps 1 and 3 are pure, so a host can execute the request itself and still
//! reuse the encoding and validation.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::address::build_url;
use crate::config::ClientConfig;
use crate::encode::encode_body;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::ParamMap;
use crate::route::{ParamKind, Route, Segment};
use crate::transport::Transport;

/// Asynchronous, stateless client for the Backlog API.
#[derive(Clone)]
pub struct BacklogClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacklogClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BacklogClient {
    /// Client using the default reqwest transport.
    #[cfg(feature = "reqwest")]
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::transport::ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for `route` without sending it.
    pub fn build_request(
        &self,
        route: &Route,
        segments: &[Segment<'_>],
        params: &ParamMap,
    ) -> HttpRequest {
        let empty = ParamMap::new();
        let (query, body) = match route.kind {
            ParamKind::Query => (params, &empty),
            ParamKind::Body => (&empty, params),
            ParamKind::None => (&empty, &empty),
        };

        let path = route.path_with(segments);
        let url = build_url(&self.config.endpoint, &self.config.credentials, &path, query);
        let body = route.method.carries_body().then(|| encode_body(body));

        HttpRequest {
            method: route.method,
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body,
        }
    }

    /// Validate `response` and decode its body as untyped JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Send one request for `route` and decode the result.
    pub async fn call(
        &self,
        route: &Route,
        segments: &[Segment<'_>],
        params: &ParamMap,
    ) -> Result<Value, ApiError> {
        let response = self.execute(route, segments, params).await?;
        self.parse_response(response)
    }

    /// Like [`BacklogClient::call`], decoding into `T` instead of `Value`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        route: &Route,
        segments: &[Segment<'_>],
        params: &ParamMap,
    ) -> Result<T, ApiError> {
        let response = self.execute(route, segments, params).await?;
        check_status(&response)?;
        decode(&response)
    }

    async fn execute(
        &self,
        route: &Route,
        segments: &[Segment<'_>],
        params: &ParamMap,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(route, segments, params);
        tracing::debug!(
            operation = route.name,
            method = %request.method,
            url = request.path_for_log(),
            "sending request"
        );
        let response = self.transport.send(request).await?;
        tracing::debug!(operation = route.name, status = response.status, "received response");
        Ok(response)
    }
}

/// Fail with `ApiError::Request` unless the status is in `200..300`.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    tracing::warn!(
        status = response.status,
        status_text = %response.status_text,
        "request rejected"
    );
    Err(ApiError::Request {
        status: response.status,
        status_text: response.status_text.clone(),
        body: response.body.clone(),
    })
}

/// Decode the response body. No schema is enforced beyond what `T` requires.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    response.json()
}
