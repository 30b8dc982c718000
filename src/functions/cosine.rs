//! `x_cosine_sim(json, json) -> real`

use std::sync::Arc;

use super::{FunctionBuilder, ScalarFunction, VectorArgs};
use crate::error::{Error, Result};
use crate::expression::{Expression, Row};
use crate::json::Coercion;
use crate::utils::math::cosine_similarity;

pub const NAME: &str = "x_cosine_sim";

const CONTEXT: &str = "Invalid JSON Array: an array of non-zero numbers was expected";

#[derive(Debug, Clone)]
pub struct CosineSimilarity {
    args: VectorArgs,
}

impl CosineSimilarity {
    pub fn new(args: Vec<Arc<dyn Expression>>, coercion: Coercion) -> Result<Self> {
        Ok(Self {
            args: VectorArgs::new(NAME, args, coercion)?,
        })
    }
}

impl ScalarFunction for CosineSimilarity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn eval_real(&self, row: &Row) -> Result<Option<f64>> {
        let Some((a, b)) = self.args.eval_pair(row, CONTEXT)? else {
            return Ok(None);
        };
        cosine_similarity(&a, &b)
            .map(Some)
            .map_err(|source| Error::Vector {
                context: CONTEXT,
                source,
            })
    }

    fn clone_boxed(&self) -> Box<dyn ScalarFunction> {
        Box::new(self.clone())
    }
}

pub struct CosineSimilarityBuilder;

impl FunctionBuilder for CosineSimilarityBuilder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn build(
        &self,
        args: Vec<Arc<dyn Expression>>,
        coercion: Coercion,
    ) -> Result<Box<dyn ScalarFunction>> {
        let sig = CosineSimilarity::new(args, coercion)?;
        tracing::debug!("built {} with {} coercion", NAME, coercion.as_str());
        Ok(Box::new(sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::expression::Constant;
    use serde_json::json;

    fn build(a: serde_json::Value, b: serde_json::Value) -> CosineSimilarity {
        CosineSimilarity::new(
            vec![Arc::new(Constant::json(a)), Arc::new(Constant::json(b))],
            Coercion::Strict,
        )
        .unwrap()
    }

    #[test]
    fn test_identical_vectors() {
        let f = build(json!([1.1, 1.2, 1.3]), json!([1.1, 1.2, 1.3]));
        let v = f.eval_real(&Row::empty()).unwrap().unwrap();
        assert!((v - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn test_kernel_error_is_wrapped() {
        let f = build(json!([1.0, 2.0]), json!([1.0]));
        let err = f.eval_real(&Row::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert_eq!(
            err.to_string(),
            "Invalid JSON Array: an array of non-zero numbers was expected: Invalid vectors: two arrays of the same length were expected"
        );
    }

    #[test]
    fn test_zero_vector_yields_nan() {
        let f = build(json!([0, 0, 0]), json!([1, 2, 3]));
        assert!(f.eval_real(&Row::empty()).unwrap().unwrap().is_nan());
    }
}
