//! Function registry mapping SQL function names to builders
//!
//! The registry is built once on first use and never mutated afterwards, so lookups
//! need no locking. Names are matched case-insensitively, as SQL identifiers are.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::functions::{
    CosineSimilarityBuilder, DotProductBuilder, FunctionBuilder, ScalarFunction, cosine,
    dot_product,
};
use crate::json::Coercion;

/// Global function registry: lowercase name -> builder
static FUNCTIONS: Lazy<HashMap<&'static str, &'static dyn FunctionBuilder>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, &'static dyn FunctionBuilder> = HashMap::new();
    m.insert(cosine::NAME, &CosineSimilarityBuilder);
    m.insert(dot_product::NAME, &DotProductBuilder);
    m
});

/// Look up a builder by function name
pub fn lookup(name: &str) -> Option<&'static dyn FunctionBuilder> {
    FUNCTIONS.get(name.to_lowercase().as_str()).copied()
}

/// Registered function names, sorted
pub fn function_names() -> Vec<&'static str> {
    let mut names: Vec<_> = FUNCTIONS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Resolve `name` and construct the function over `args`
///
/// # Errors
/// * `UnknownFunction` if no function is registered under `name`
/// * `WrongArgumentCount` / `IncorrectArgumentType` from the builder
pub fn build_function(
    name: &str,
    args: Vec<Arc<dyn Expression>>,
    coercion: Coercion,
) -> Result<Box<dyn ScalarFunction>> {
    let builder = lookup(name).ok_or_else(|| Error::UnknownFunction {
        name: name.to_string(),
    })?;
    builder.build(args, coercion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::expression::{Constant, Datum};
    use serde_json::json;

    fn json_args() -> Vec<Arc<dyn Expression>> {
        vec![
            Arc::new(Constant::json(json!([1.0]))),
            Arc::new(Constant::json(json!([2.0]))),
        ]
    }

    #[test]
    fn test_names() {
        assert_eq!(function_names(), vec!["x_cosine_sim", "x_dot_product"]);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(lookup("X_COSINE_SIM").map(|b| b.name()), Some("x_cosine_sim"));
        assert_eq!(lookup("x_Dot_Product").map(|b| b.name()), Some("x_dot_product"));
        assert!(lookup("x_euclidean").is_none());
    }

    #[test]
    fn test_unknown_function() {
        let err = build_function("vec_l2", json_args(), Coercion::Strict).unwrap_err();
        assert!(matches!(err, Error::UnknownFunction { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_wrong_argument_count() {
        let mut args = json_args();
        args.push(Arc::new(Constant::json(json!([3.0]))));
        let err = build_function("x_dot_product", args, Coercion::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongArgumentCount {
                function: "x_dot_product",
                expected: 2,
                actual: 3
            }
        ));

        let err = build_function("x_cosine_sim", vec![], Coercion::Strict).unwrap_err();
        assert!(matches!(err, Error::WrongArgumentCount { actual: 0, .. }));
    }

    #[test]
    fn test_incorrect_argument_type() {
        let args: Vec<Arc<dyn Expression>> = vec![
            Arc::new(Constant::json(json!([1.0]))),
            Arc::new(Constant::new(Datum::Int(7))),
        ];
        let err = build_function("x_cosine_sim", args, Coercion::Strict).unwrap_err();
        assert!(matches!(
            err,
            Error::IncorrectArgumentType {
                position: 2,
                found: "INT",
                ..
            }
        ));
    }

    #[test]
    fn test_return_type_is_real() {
        let f = build_function("x_dot_product", json_args(), Coercion::Strict).unwrap();
        assert_eq!(f.return_type(), crate::expression::EvalType::Real);
        assert_eq!(f.name(), "x_dot_product");
    }
}
