//! JSON value classification and element-to-float coercion

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level shape of a JSON value, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How array elements are converted to `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Only JSON number literals convert.
    #[default]
    Strict,
    /// The query engine's JSON-to-float rule: literals and numeric strings convert too.
    Host,
}

impl Coercion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coercion::Strict => "strict",
            Coercion::Host => "host",
        }
    }

    /// Convert one JSON element, or `None` if it has no numeric reading under this policy.
    pub fn to_f64(&self, value: &Value) -> Option<f64> {
        match (self, value) {
            (_, Value::Number(n)) => n.as_f64(),
            (Coercion::Strict, _) => None,
            (Coercion::Host, Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
            (Coercion::Host, Value::Null) => Some(0.0),
            (Coercion::Host, Value::String(s)) => s.trim().parse::<f64>().ok(),
            (Coercion::Host, Value::Array(_) | Value::Object(_)) => None,
        }
    }
}

impl std::str::FromStr for Coercion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Coercion::Strict),
            "host" => Ok(Coercion::Host),
            other => Err(format!(
                "invalid coercion '{}': expected 'strict' or 'host'",
                other
            )),
        }
    }
}
