//! Mathematical utility functions

use crate::error::VectorError;

fn check_pair(a: &[f64], b: &[f64]) -> Result<(), VectorError> {
    if a.len() != b.len() {
        tracing::trace!("vector length mismatch: a={}, b={}", a.len(), b.len());
        return Err(VectorError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(VectorError::EmptyVector);
    }
    Ok(())
}

/// Sum of pairwise products, accumulated left to right.
/// NaN and infinities propagate per IEEE 754.
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64, VectorError> {
    check_pair(a, b)?;
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
    }
    Ok(sum)
}

/// Calculate cosine similarity between two vectors in a single pass.
///
/// A zero-norm vector is not rejected: the division yields NaN or ±Inf.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, VectorError> {
    check_pair(a, b)?;
    let (mut sum, mut s1, mut s2) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        sum += x * y;
        s1 += x * x;
        s2 += y * y;
    }
    Ok(sum / (s1.sqrt() * s2.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_dot_product_reference_values() {
        let a = [1.1, 1.2, 1.3, 1.4, 1.5];
        let b = [2.1, 2.2, 2.3, 2.4, 2.5];
        assert!((dot_product(&a, &a).unwrap() - 8.55).abs() <= EPS);
        assert!((dot_product(&b, &a).unwrap() - 15.05).abs() <= EPS);

        let neg = [-1.0, -2.0, -3.0, -4.0, -5.0, -6.0];
        let pos = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5];
        assert!((dot_product(&neg, &pos).unwrap() + 28.0).abs() <= EPS);
    }

    #[test]
    fn test_dot_product_accumulates_in_order() {
        let a = [1e17, 1.0, -1e17];
        let b = [1.0, 1.0, 1.0];
        // (1e17 + 1) rounds back to 1e17 before the subtraction
        assert_eq!(dot_product(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_reference_values() {
        let a = [2.1, 2.2, 2.3, 2.4, 2.5];
        let b = [1.1, 1.2, 1.3, 1.4, 1.5];
        assert!((cosine_similarity(&a, &b).unwrap() - 0.9988980834329954).abs() <= EPS);
        assert!((cosine_similarity(&b, &b).unwrap() - 1.0).abs() <= EPS);

        let neg = [-1.0, -2.0, -3.0, -4.0, -5.0, -6.0];
        let pos = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5];
        assert!((cosine_similarity(&neg, &pos).unwrap() + 0.949807619836754).abs() <= EPS);
    }

    #[test]
    fn test_length_mismatch() {
        let err = dot_product(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, VectorError::LengthMismatch { left: 2, right: 1 });
        let err = cosine_similarity(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, VectorError::LengthMismatch { left: 1, right: 2 });
    }

    #[test]
    fn test_empty_vectors() {
        assert_eq!(dot_product(&[], &[]).unwrap_err(), VectorError::EmptyVector);
        assert_eq!(
            cosine_similarity(&[], &[]).unwrap_err(),
            VectorError::EmptyVector
        );
        // Mismatch is checked first
        assert_eq!(
            dot_product(&[], &[1.0]).unwrap_err(),
            VectorError::LengthMismatch { left: 0, right: 1 }
        );
    }

    #[test]
    fn test_zero_norm_is_not_trapped() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap().is_nan());
        assert!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap().is_nan());
        // s1 underflows to 0 and s2 overflows, so the divisor is 0 * inf
        assert!(cosine_similarity(&[1e-200], &[1e200]).unwrap().is_nan());
    }

    #[test]
    fn test_underflowed_norm_gives_infinity() {
        // s1 underflows to 0 while the dot product stays nonzero
        assert_eq!(
            cosine_similarity(&[1e-200], &[1e100]).unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            cosine_similarity(&[1e-200], &[-1e100]).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_nan_poisons_sum() {
        assert!(dot_product(&[f64::NAN, 1.0], &[1.0, 1.0]).unwrap().is_nan());
        assert_eq!(
            dot_product(&[f64::INFINITY, 1.0], &[1.0, 1.0]).unwrap(),
            f64::INFINITY
        );
    }
}
