//! Vector similarity scalar functions over JSON numeric arrays.
//!
//! `x_cosine_sim` and `x_dot_product` take two JSON-typed arguments, extract each as a
//! vector of `f64`, and return a real. A NULL argument yields NULL; malformed input or
//! incompatible vectors yield an error carrying the function's context.

pub mod batch;
pub mod config;
pub mod error;
pub mod expression;
pub mod extract;
pub mod functions;
pub mod json;
pub mod registry;
pub mod utils;

pub use batch::{BatchSummary, evaluate_batch};
pub use error::{Error, ErrorKind, Result, VectorError};
pub use expression::{ColumnRef, Constant, Datum, EvalType, Expression, Row};
pub use functions::{FunctionBuilder, ScalarFunction};
pub use json::Coercion;
pub use registry::build_function;
