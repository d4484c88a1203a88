//! HTTP request and response types described as plain data.
//!
//! # Design
//! The client builds `HttpRequest` values and consumes `HttpResponse` values.
//! A `Transport` executes the round-trip in between; a host that prefers to
//! do its own I/O can execute the request itself and hand the response back
//! to `BacklogClient::parse_response`.
//!
//! All fields use owned types so values can be moved across tasks freely.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::encode::FormBody;
use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Every verb except GET sends a multipart body, possibly with no fields.
    pub fn carries_body(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `headers` lists the fixed headers only. When `body` is present the
/// transport adds the multipart `content-type` with its boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<FormBody>,
}

impl HttpRequest {
    /// The URL without its query string, safe to log.
    pub fn path_for_log(&self) -> &str {
        self.url.split('?').next().unwrap_or_default()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase, e.g. `Not Found`.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
