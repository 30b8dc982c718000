//! Batch evaluation over many rows.
//!
//! Each rayon worker gets its own duplicate of the function; rows are evaluated
//! independently and a failing row never aborts the rest of the batch.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::BatchConfig;
use crate::error::Result;
use crate::expression::Row;
use crate::functions::ScalarFunction;

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub values: usize,
    pub nulls: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<Option<f64>>]) -> Self {
        let mut s = BatchSummary {
            rows: results.len(),
            ..Default::default()
        };
        for r in results {
            match r {
                Ok(Some(_)) => s.values += 1,
                Ok(None) => s.nulls += 1,
                Err(_) => s.errors += 1,
            }
        }
        s
    }
}

/// Evaluate `func` over `rows`, returning one result per row in input order.
///
/// Runs on the rayon pool when `config.parallel` is set and the batch has at least
/// `config.min_parallel_rows` rows; otherwise evaluates serially on the caller's thread.
pub fn evaluate_batch(
    func: &dyn ScalarFunction,
    rows: &[Row],
    config: &BatchConfig,
) -> Vec<Result<Option<f64>>> {
    let results: Vec<_> = if config.parallel && rows.len() >= config.min_parallel_rows {
        rows.par_iter()
            .map_init(|| func.clone_boxed(), |f, row| f.eval_real(row))
            .collect()
    } else {
        rows.iter().map(|row| func.eval_real(row)).collect()
    };

    let summary = BatchSummary::from_results(&results);
    tracing::debug!(
        "{} batch: rows={}, values={}, nulls={}, errors={}",
        func.name(),
        summary.rows,
        summary.values,
        summary.nulls,
        summary.errors
    );
    results
}
