//! Parameter values handed to the encoder.
//!
//! # Design
//! `ParamMap` is an ordered list of `(name, value)` pairs rather than a hash
//! map: the encoded query string and form body follow insertion order, and
//! test vectors compare wire output byte for byte. Inserting an existing name
//! replaces the value in place and keeps its original position.
//!
//! A value is either absent, a single scalar, or a list of scalars. Whether a
//! value is actually emitted is decided by the encoder (see `encode`), not
//! here, so a map can freely carry `0`, `false` or `""`.

use std::fmt;

/// A single wire value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// True for the values the service treats as "not given": empty string,
    /// zero, NaN and `false`.
    pub fn is_falsy(&self) -> bool {
        match self {
            Scalar::Str(s) => s.is_empty(),
            Scalar::Int(n) => *n == 0,
            Scalar::UInt(n) => *n == 0,
            Scalar::Float(n) => *n == 0.0 || n.is_nan(),
            Scalar::Bool(b) => !b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::UInt(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Str(value.clone())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::UInt(u64::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::UInt(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Value stored under one field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    #[default]
    Absent,
    Scalar(Scalar),
    List(Vec<Scalar>),
}

macro_rules! scalar_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_param!(Scalar, &str, String, &String, i32, i64, u32, u64, f64, bool);

impl<T: Into<Scalar>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => ParamValue::Scalar(v.into()),
            None => ParamValue::Absent,
        }
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Scalar>> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        ParamValue::List(values.iter().cloned().map(Into::into).collect())
    }
}

/// Untyped JSON maps onto parameters the way a dynamic caller would expect:
/// `null` is absent, arrays become lists, objects are sent as their JSON text.
impl From<&serde_json::Value> for ParamValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ParamValue::Absent,
            serde_json::Value::Array(items) => {
                ParamValue::List(items.iter().map(json_scalar).collect())
            }
            other => ParamValue::Scalar(json_scalar(other)),
        }
    }
}

fn json_scalar(value: &serde_json::Value) -> Scalar {
    match value {
        serde_json::Value::String(s) => Scalar::Str(s.clone()),
        serde_json::Value::Bool(b) => Scalar::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Scalar::Int(i)
            } else if let Some(u) = n.as_u64() {
                Scalar::UInt(u)
            } else {
                Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        other => Scalar::Str(other.to_string()),
    }
}

/// Ordered field name → value mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`ParamMap::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Merge every entry of `other` into `self`, in `other`'s order.
    pub fn extend(&mut self, other: &ParamMap) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParamMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Conversion of a parameter object into the encoder's input.
///
/// Implemented by every typed parameter struct in `types`, and by `ParamMap`
/// itself for callers that build parameters dynamically.
pub trait ToParams {
    fn to_params(&self) -> ParamMap;
}

impl ToParams for ParamMap {
    fn to_params(&self) -> ParamMap {
        self.clone()
    }
}
