//! Client configuration.
//!
//! # Design
//! Configuration is plain serde data so the host can load it from wherever it
//! keeps secrets; this crate never reads files or the environment. The only
//! long-lived state of a client is this value, and it is never mutated after
//! construction.

use std::fmt;

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "backlog.jp";

/// Tenant identifier and API key.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Subdomain of the tenant's service instance.
    pub tenant_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(tenant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            api_key: api_key.into(),
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

/// Where tenants live. Requests go to `{scheme}://{tenant}.{host}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceEndpoint {
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self {
            scheme: Scheme::Https,
            host: default_host(),
        }
    }
}

/// Everything a `BacklogClient` needs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(default)]
    pub endpoint: ServiceEndpoint,
}

impl ClientConfig {
    pub fn new(tenant_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(tenant_id, api_key),
            endpoint: ServiceEndpoint::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: ServiceEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }
}
