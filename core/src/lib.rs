//! Asynchronous typed client for the Backlog REST API.
//!
//! # Overview
//! Maps method calls onto HTTP requests against `https://{tenant}.backlog.jp`,
//! encodes parameters into query strings or multipart form bodies, and decodes
//! JSON responses. One request per call; no retries, caching or paging.
//!
//! # Design
//! - `BacklogClient` is stateless: it holds only its `ClientConfig` and a
//!   shared `Transport`.
//! - Operations are declared in a static route table (`route`) and dispatched
//!   through a single routine (`BacklogClient::call`); the per-operation
//!   methods in `api` are thin forwarders.
//! - Request building and response parsing are pure (`build_request` /
//!   `parse_response`), so a host can execute the I/O itself.
//! - The default transport uses reqwest and is behind the `reqwest` feature.

pub mod address;
pub mod api;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod http;
pub mod params;
pub mod route;
pub mod transport;
pub mod types;

pub use client::BacklogClient;
pub use config::{ClientConfig, Credentials, Scheme, ServiceEndpoint};
pub use encode::{encode_body, encode_query, FormBody, FormField};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{ParamMap, ParamValue, Scalar, ToParams};
pub use route::{ParamKind, Route};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::*;
