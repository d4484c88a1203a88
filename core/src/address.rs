//! Absolute request URLs.

use crate::config::{Credentials, ServiceEndpoint};
use crate::encode::encode_query;
use crate::params::ParamMap;

/// Name of the query field carrying the API key.
pub const API_KEY_FIELD: &str = "apiKey";

/// Compose `{scheme}://{tenant}.{host}{path}?{query}`.
///
/// The API key is appended after the caller's fields, or replaced in place if
/// the caller already supplied `apiKey`. It is never sent in headers or bodies.
pub fn build_url(
    endpoint: &ServiceEndpoint,
    credentials: &Credentials,
    path: &str,
    query: &ParamMap,
) -> String {
    let mut query = query.clone();
    query.insert(API_KEY_FIELD, credentials.api_key.as_str());
    format!(
        "{}://{}.{}{}?{}",
        endpoint.scheme.as_str(),
        credentials.tenant_id,
        endpoint.host,
        path,
        encode_query(&query)
    )
}
