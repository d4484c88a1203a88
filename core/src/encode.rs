//! Query-string and multipart-form encoding of a `ParamMap`.
//!
//! # Design
//! Both encodings share one field-selection pass (`wire_pairs`):
//! - fields are visited in insertion order;
//! - absent and falsy scalars (`""`, `0`, `false`) are skipped, so a caller
//!   can leave a field empty to mean "use the server default";
//! - a list emits one `key[]` entry per element, in element order, and its
//!   elements are never filtered.
//!
//! Values are written as their plain string form. The encoder does not
//! percent-escape; whatever escaping URL syntax requires is applied when the
//! transport parses the final URL.

use crate::params::{ParamMap, ParamValue};

/// One named field of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// A multipart form body described as plain data.
///
/// The transport is responsible for rendering the parts and the
/// `content-type` header with its boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    pub fields: Vec<FormField>,
}

impl FormBody {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Values of every field named `name`, in order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| f.value.as_str())
    }

    #[cfg(feature = "reqwest")]
    pub(crate) fn into_multipart(self) -> reqwest::multipart::Form {
        self.fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, field| {
                form.text(field.name, field.value)
            })
    }
}

/// Encode `params` as `key=value` pairs joined by `&`.
pub fn encode_query(params: &ParamMap) -> String {
    wire_pairs(params)
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encode `params` as multipart form fields.
pub fn encode_body(params: &ParamMap) -> FormBody {
    FormBody {
        fields: wire_pairs(params)
            .map(|(name, value)| FormField { name, value })
            .collect(),
    }
}

fn wire_pairs(params: &ParamMap) -> impl Iterator<Item = (String, String)> + '_ {
    params.iter().flat_map(|(key, value)| {
        let pairs: Vec<(String, String)> = match value {
            ParamValue::Absent => Vec::new(),
            ParamValue::Scalar(scalar) if scalar.is_falsy() => Vec::new(),
            ParamValue::Scalar(scalar) => vec![(key.to_string(), scalar.to_string())],
            ParamValue::List(items) => items
                .iter()
                .map(|item| (format!("{key}[]"), item.to_string()))
                .collect(),
        };
        pairs
    })
}
