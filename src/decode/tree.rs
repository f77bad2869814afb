//! A generic, order-preserving value tree that both JSON and YAML input
//! convert into before the schema walk, so steps after parsing are
//! format-agnostic. Resource limits are enforced during this
//! conversion, not afterward: a document that is too deep or too large
//! never reaches the schema walker at all.

use indexmap::IndexMap;

use super::limits::DecodeLimits;
use crate::diagnostics::{Diagnostic, DiagnosticCode};

/// A JSON/YAML value, independent of which format it was read from.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<DecodeValue>),
    Object(IndexMap<String, DecodeValue>),
}

impl DecodeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, DecodeValue>> {
        match self {
            DecodeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DecodeValue::Null => "null",
            DecodeValue::Bool(_) => "bool",
            DecodeValue::Int(_) => "int",
            DecodeValue::Float(_) => "float",
            DecodeValue::String(_) => "string",
            DecodeValue::Array(_) => "array",
            DecodeValue::Object(_) => "object",
        }
    }

    /// Convert a `serde_json::Value`, enforcing `limits` along the way.
    pub fn from_json(value: serde_json::Value, limits: &DecodeLimits) -> Result<Self, Diagnostic> {
        Self::from_json_at_depth(value, limits, 0)
    }

    fn from_json_at_depth(
        value: serde_json::Value,
        limits: &DecodeLimits,
        depth: usize,
    ) -> Result<Self, Diagnostic> {
        if depth > limits.max_depth {
            return Err(too_deep(limits));
        }
        Ok(match value {
            serde_json::Value::Null => DecodeValue::Null,
            serde_json::Value::Bool(b) => DecodeValue::Bool(b),
            serde_json::Value::Number(n) => number_from_json(n),
            serde_json::Value::String(s) => string_within_limit(s, limits)?,
            serde_json::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(Self::from_json_at_depth(item, limits, depth + 1)?);
                }
                DecodeValue::Array(out)
            }
            serde_json::Value::Object(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key, Self::from_json_at_depth(value, limits, depth + 1)?);
                }
                DecodeValue::Object(out)
            }
        })
    }

    /// Convert a `serde_yaml::Value`, enforcing `limits` along the way.
    pub fn from_yaml(value: serde_yaml::Value, limits: &DecodeLimits) -> Result<Self, Diagnostic> {
        Self::from_yaml_at_depth(value, limits, 0)
    }

    fn from_yaml_at_depth(
        value: serde_yaml::Value,
        limits: &DecodeLimits,
        depth: usize,
    ) -> Result<Self, Diagnostic> {
        if depth > limits.max_depth {
            return Err(too_deep(limits));
        }
        Ok(match value {
            serde_yaml::Value::Null => DecodeValue::Null,
            serde_yaml::Value::Bool(b) => DecodeValue::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DecodeValue::Int(i)
                } else {
                    DecodeValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_yaml::Value::String(s) => string_within_limit(s, limits)?,
            serde_yaml::Value::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(Self::from_yaml_at_depth(item, limits, depth + 1)?);
                }
                DecodeValue::Array(out)
            }
            serde_yaml::Value::Mapping(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    let key = key
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| yaml_scalar_to_string(&key));
                    out.insert(key, Self::from_yaml_at_depth(value, limits, depth + 1)?);
                }
                DecodeValue::Object(out)
            }
            serde_yaml::Value::Tagged(tagged) => {
                Self::from_yaml_at_depth(tagged.value, limits, depth)?
            }
        })
    }

    /// Convert back into a `serde_json::Value`, for callers (the
    /// canonical-form serializer, the schema walker) that want to
    /// reuse `serde`'s own typed-deserialization machinery on top of a
    /// tree whose limits have already been checked.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            DecodeValue::Null => serde_json::Value::Null,
            DecodeValue::Bool(b) => serde_json::Value::Bool(b),
            DecodeValue::Int(i) => serde_json::Value::Number(i.into()),
            DecodeValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            DecodeValue::String(s) => serde_json::Value::String(s),
            DecodeValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Self::into_json).collect())
            }
            DecodeValue::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into_json())).collect(),
            ),
        }
    }
}

fn number_from_json(n: serde_json::Number) -> DecodeValue {
    if let Some(i) = n.as_i64() {
        DecodeValue::Int(i)
    } else {
        DecodeValue::Float(n.as_f64().unwrap_or(0.0))
    }
}

fn string_within_limit(s: String, limits: &DecodeLimits) -> Result<DecodeValue, Diagnostic> {
    if s.len() > limits.max_string_len {
        return Err(Diagnostic::new(
            DiagnosticCode::StringTooLong,
            format!(
                "string of {} bytes exceeds the {}-byte limit",
                s.len(),
                limits.max_string_len
            ),
        ));
    }
    Ok(DecodeValue::String(s))
}

fn too_deep(limits: &DecodeLimits) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::NestingTooDeep,
        format!("document nests deeper than the {}-level limit", limits.max_depth),
    )
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    serde_yaml::to_string(value)
        .unwrap_or_default()
        .trim()
        .to_string()
}
