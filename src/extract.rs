//! Turning JSON argument values into `f64` vectors

use serde_json::Value;

use crate::error::{Error, Result, VectorError};
use crate::expression::{Expression, Row};
use crate::json::{Coercion, JsonKind};

/// Read a JSON array of numbers as a vector, preserving order and length.
///
/// Fails on the first element that has no numeric reading; no partial vector is returned.
pub fn as_f64_array(
    json: &Value,
    coercion: Coercion,
) -> std::result::Result<Vec<f64>, VectorError> {
    let Value::Array(items) = json else {
        return Err(VectorError::InvalidShape {
            found: JsonKind::of(json),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, elem)| {
            coercion
                .to_f64(elem)
                .ok_or_else(|| VectorError::InvalidElement {
                    index,
                    found: JsonKind::of(elem),
                })
        })
        .collect()
}

/// Evaluate `expr` against `row` and extract its vector.
///
/// `Ok(None)` means the argument was NULL; the value is not inspected in that case.
/// Argument evaluation errors are returned unchanged; shape failures are wrapped
/// with `context`, which names the calling function's contract.
pub fn extract_f64_array(
    expr: &dyn Expression,
    row: &Row,
    coercion: Coercion,
    context: &'static str,
) -> Result<Option<Vec<f64>>> {
    let Some(json) = expr.eval_json(row)? else {
        return Ok(None);
    };
    as_f64_array(&json, coercion)
        .map(Some)
        .map_err(|source| Error::Vector { context, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{ColumnRef, Constant, Datum};
    use serde_json::json;

    const CTX: &str = "test context";

    #[test]
    fn test_extracts_in_order() {
        let v = as_f64_array(&json!([3, 1.5, -2, 0]), Coercion::Strict).unwrap();
        assert_eq!(v, vec![3.0, 1.5, -2.0, 0.0]);
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(as_f64_array(&json!([]), Coercion::Strict).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_is_invalid_shape() {
        for (value, kind) in [
            (json!({"a": 1}), JsonKind::Object),
            (json!(1.5), JsonKind::Number),
            (json!("[1,2]"), JsonKind::String),
            (Value::Null, JsonKind::Null),
        ] {
            assert_eq!(
                as_f64_array(&value, Coercion::Strict).unwrap_err(),
                VectorError::InvalidShape { found: kind }
            );
        }
    }

    #[test]
    fn test_bad_element_fails_whole_array() {
        let err = as_f64_array(&json!([1, 2, "x", 4]), Coercion::Strict).unwrap_err();
        assert_eq!(
            err,
            VectorError::InvalidElement {
                index: 2,
                found: JsonKind::String
            }
        );

        let err = as_f64_array(&json!([1, [2, 3]]), Coercion::Host).unwrap_err();
        assert_eq!(
            err,
            VectorError::InvalidElement {
                index: 1,
                found: JsonKind::Array
            }
        );
    }

    #[test]
    fn test_host_coercion_accepts_numeric_strings() {
        let v = as_f64_array(&json!(["1.5", true, null, 2]), Coercion::Host).unwrap();
        assert_eq!(v, vec![1.5, 1.0, 0.0, 2.0]);
        assert!(as_f64_array(&json!(["1.5"]), Coercion::Strict).is_err());
    }

    #[test]
    fn test_null_argument_propagates() {
        let row = Row::new(vec![Datum::Null]);
        let got = extract_f64_array(&ColumnRef::json("v", 0), &row, Coercion::Strict, CTX).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_extract_from_constant() {
        let c = Constant::json(json!([0.25, 0.5]));
        let got = extract_f64_array(&c, &Row::empty(), Coercion::Strict, CTX)
            .unwrap()
            .unwrap();
        assert_eq!(got, vec![0.25, 0.5]);
    }

    #[test]
    fn test_shape_error_carries_context() {
        let c = Constant::json(json!({"v": [1]}));
        let err = extract_f64_array(&c, &Row::empty(), Coercion::Strict, CTX).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidShape);
        assert!(err.to_string().starts_with("test context: "));
    }
}
