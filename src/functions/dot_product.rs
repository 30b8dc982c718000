//! `x_dot_product(json, json) -> real`

use std::sync::Arc;

use super::{FunctionBuilder, ScalarFunction, VectorArgs};
use crate::error::{Error, Result};
use crate::expression::{Expression, Row};
use crate::json::Coercion;
use crate::utils::math::dot_product;

pub const NAME: &str = "x_dot_product";

const CONTEXT: &str = "Invalid JSON Array: an array of non-zero numbers were expected";

#[derive(Debug, Clone)]
pub struct DotProduct {
    args: VectorArgs,
}

impl DotProduct {
    pub fn new(args: Vec<Arc<dyn Expression>>, coercion: Coercion) -> Result<Self> {
        Ok(Self {
            args: VectorArgs::new(NAME, args, coercion)?,
        })
    }
}

impl ScalarFunction for DotProduct {
    fn name(&self) -> &'static str {
        NAME
    }

    fn eval_real(&self, row: &Row) -> Result<Option<f64>> {
        let Some((a, b)) = self.args.eval_pair(row, CONTEXT)? else {
            return Ok(None);
        };
        dot_product(&a, &b)
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

pub struct DotProductBuilder;

impl FunctionBuilder for DotProductBuilder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn build(
        &self,
        args: Vec<Arc<dyn Expression>>,
        coercion: Coercion,
    ) -> Result<Box<dyn ScalarFunction>> {
        let sig = DotProduct::new(args, coercion)?;
        tracing::debug!("built {} with {} coercion", NAME, coercion.as_str());
        Ok(Box::new(sig))
    }
}
