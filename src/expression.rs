//! Row, datum and expression types at the boundary with the query engine.
//!
//! The engine owns the real versions of these; the implementations here are the minimal
//! set needed to drive the vector functions: literals, column references and the implicit
//! string-to-JSON cast applied to string-typed arguments.

use std::borrow::Cow;
use std::fmt;

use anyhow::anyhow;
use serde_json::Value;

use crate::error::Result;

/// Evaluation type an expression produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalType {
    Int,
    Real,
    String,
    Json,
}

impl EvalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvalType::Int => "INT",
            EvalType::Real => "REAL",
            EvalType::String => "STRING",
            EvalType::Json => "JSON",
        }
    }
}

impl fmt::Display for EvalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell value; `Null` is SQL NULL, distinct from a JSON `null` literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Int(i64),
    Real(f64),
    String(String),
    Json(Value),
}

impl Datum {
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Datum::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Evaluation type of a non-null datum; NULL literals are typed as JSON.
    pub fn eval_type(&self) -> EvalType {
        match self {
            Datum::Int(_) => EvalType::Int,
            Datum::Real(_) => EvalType::Real,
            Datum::String(_) => EvalType::String,
            Datum::Null | Datum::Json(_) => EvalType::Json,
        }
    }
}

impl From<Option<f64>> for Datum {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Datum::Null, Datum::Real)
    }
}

/// One input row, columns addressed by offset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    datums: Vec<Datum>,
}

impl Row {
    pub fn new(datums: Vec<Datum>) -> Self {
        Self { datums }
    }

    /// A row with no columns, for evaluating constant-only expressions.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, idx: usize) -> Option<&Datum> {
        self.datums.get(idx)
    }

    pub fn len(&self) -> usize {
        self.datums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datums.is_empty()
    }
}

/// A sub-expression the vector functions evaluate per row.
///
/// `Ok(None)` is SQL NULL. Implementations must not hold per-row mutable state.
pub trait Expression: Send + Sync + fmt::Debug {
    fn eval_type(&self) -> EvalType;

    fn eval_json<'a>(&'a self, row: &'a Row) -> Result<Option<Cow<'a, Value>>>;
}

/// A literal value
#[derive(Debug, Clone)]
pub struct Constant {
    datum: Datum,
}

impl Constant {
    pub fn new(datum: Datum) -> Self {
        Self { datum }
    }

    pub fn json(value: Value) -> Self {
        Self::new(Datum::Json(value))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::new(Datum::String(s.into()))
    }

    pub fn null() -> Self {
        Self::new(Datum::Null)
    }

    pub fn datum(&self) -> &Datum {
        &self.datum
    }
}

impl Expression for Constant {
    fn eval_type(&self) -> EvalType {
        self.datum.eval_type()
    }

    fn eval_json<'a>(&'a self, _row: &'a Row) -> Result<Option<Cow<'a, Value>>> {
        datum_as_json(&self.datum)
    }
}

/// Reference to a row column by offset
#[derive(Debug, Clone)]
pub struct ColumnRef {
    name: String,
    index: usize,
    tp: EvalType,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, index: usize, tp: EvalType) -> Self {
        Self {
            name: name.into(),
            index,
            tp,
        }
    }

    pub fn json(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, index, EvalType::Json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Expression for ColumnRef {
    fn eval_type(&self) -> EvalType {
        self.tp
    }

    fn eval_json<'a>(&'a self, row: &'a Row) -> Result<Option<Cow<'a, Value>>> {
        let datum = row.get(self.index).ok_or_else(|| {
            anyhow!(
                "column '{}' (offset {}) is out of range for a row of {} columns",
                self.name,
                self.index,
                row.len()
            )
        })?;
        datum_as_json(datum)
    }
}

/// Parses a string-typed argument as JSON
#[derive(Debug)]
pub struct CastStringAsJson {
    inner: std::sync::Arc<dyn Expression>,
}

impl CastStringAsJson {
    pub fn new(inner: std::sync::Arc<dyn Expression>) -> Self {
        Self { inner }
    }
}

impl Expression for CastStringAsJson {
    fn eval_type(&self) -> EvalType {
        EvalType::Json
    }

    fn eval_json<'a>(&'a self, row: &'a Row) -> Result<Option<Cow<'a, Value>>> {
        let Some(value) = self.inner.eval_json(row)? else {
            return Ok(None);
        };
        if let Value::String(s) = value.as_ref() {
            let parsed: Value = serde_json::from_str(s)
                .map_err(|e| anyhow!("Invalid JSON text in argument: {}", e))?;
            return Ok(Some(Cow::Owned(parsed)));
        }
        Ok(Some(value))
    }
}

/// Reads a datum as JSON. Strings become JSON strings; the explicit cast parses them.
/// NaN and infinite reals have no JSON form and fail instead of reading as JSON null.
fn datum_as_json(datum: &Datum) -> Result<Option<Cow<'_, Value>>> {
    Ok(match datum {
        Datum::Null => None,
        Datum::Json(v) => Some(Cow::Borrowed(v)),
        Datum::Int(i) => Some(Cow::Owned(Value::from(*i))),
        Datum::Real(r) => {
            let n = serde_json::Number::from_f64(*r)
                .ok_or_else(|| anyhow!("non-finite real {} cannot be read as JSON", r))?;
            Some(Cow::Owned(Value::Number(n)))
        }
        Datum::String(s) => Some(Cow::Owned(Value::String(s.clone()))),
    })
}
