//! Scalar vector functions evaluated once per row

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::expression::{CastStringAsJson, Datum, EvalType, Expression, Row};
use crate::extract::extract_f64_array;
use crate::json::Coercion;

pub mod cosine;
pub mod dot_product;

pub use cosine::{CosineSimilarity, CosineSimilarityBuilder};
pub use dot_product::{DotProduct, DotProductBuilder};

/// Number of arguments every vector function takes
pub const ARITY: usize = 2;

/// A constructed function ready for per-row evaluation.
///
/// Instances hold only immutable configuration, so `clone_boxed` is a shallow copy that
/// can be handed to another worker.
pub trait ScalarFunction: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Result type, fixed at construction
    fn return_type(&self) -> EvalType {
        EvalType::Real
    }

    /// `Ok(None)` when either argument is NULL
    fn eval_real(&self, row: &Row) -> Result<Option<f64>>;

    fn eval(&self, row: &Row) -> Result<Datum> {
        self.eval_real(row).map(Datum::from)
    }

    fn clone_boxed(&self) -> Box<dyn ScalarFunction>;
}

impl Clone for Box<dyn ScalarFunction> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Validates arguments and constructs a `ScalarFunction`
pub trait FunctionBuilder: Send + Sync {
    fn name(&self) -> &'static str;

    fn build(
        &self,
        args: Vec<Arc<dyn Expression>>,
        coercion: Coercion,
    ) -> Result<Box<dyn ScalarFunction>>;
}

/// The two JSON arguments shared by both vector functions
#[derive(Debug, Clone)]
pub struct VectorArgs {
    args: [Arc<dyn Expression>; ARITY],
    coercion: Coercion,
}

impl VectorArgs {
    /// Check arity and argument types for `function`.
    ///
    /// JSON arguments are used as-is, string arguments get a JSON cast, anything else
    /// is rejected before any row is evaluated.
    pub fn new(
        function: &'static str,
        args: Vec<Arc<dyn Expression>>,
        coercion: Coercion,
    ) -> Result<Self> {
        let args: [Arc<dyn Expression>; ARITY] = args.try_into().map_err(|args: Vec<_>| {
            Error::WrongArgumentCount {
                function,
                expected: ARITY,
                actual: args.len(),
            }
        })?;

        let [left, right] = args;
        let args = [
            coerce_to_json(function, 1, left)?,
            coerce_to_json(function, 2, right)?,
        ];
        Ok(Self { args, coercion })
    }

    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    /// Evaluate and extract both arguments, left first.
    ///
    /// A NULL or failing left argument returns before the right one is evaluated.
    pub fn eval_pair(
        &self,
        row: &Row,
        context: &'static str,
    ) -> Result<Option<(Vec<f64>, Vec<f64>)>> {
        let [left, right] = &self.args;
        let Some(a) = extract_f64_array(left.as_ref(), row, self.coercion, context)? else {
            return Ok(None);
        };
        let Some(b) = extract_f64_array(right.as_ref(), row, self.coercion, context)? else {
            return Ok(None);
        };
        Ok(Some((a, b)))
    }
}

fn coerce_to_json(
    function: &'static str,
    position: usize,
    arg: Arc<dyn Expression>,
) -> Result<Arc<dyn Expression>> {
    match arg.eval_type() {
        EvalType::Json => Ok(arg),
        EvalType::String => Ok(Arc::new(CastStringAsJson::new(arg))),
        other => Err(Error::IncorrectArgumentType {
            function,
            position,
            found: other.as_str(),
        }),
    }
}
