//! Element-wise arithmetic on weight vectors.
//!
//! Weight vectors are plain `f64` slices. Every binary helper requires both
//! operands to share one length and reports a [`HgrError::Dimension`] otherwise.

use crate::errors::{dimension_mismatch, HgrError};

fn ensure_same_len(lhs: &[f64], rhs: &[f64]) -> Result<(), HgrError> {
    if lhs.len() != rhs.len() {
        return Err(dimension_mismatch("weight vector", lhs.len(), rhs.len()));
    }
    Ok(())
}

/// Adds `source` into `target` element by element.
pub fn accumulate(target: &mut [f64], source: &[f64]) -> Result<(), HgrError> {
    ensure_same_len(target, source)?;
    for (t, s) in target.iter_mut().zip(source) {
        *t += s;
    }
    Ok(())
}

/// Returns the element-wise maximum of two vectors.
pub fn max(lhs: &[f64], rhs: &[f64]) -> Result<Vec<f64>, HgrError> {
    ensure_same_len(lhs, rhs)?;
    Ok(lhs.iter().zip(rhs).map(|(a, b)| a.max(*b)).collect())
}

/// Scalarizes a weight vector as the dot product with `factors`.
pub fn weighted_sum(weights: &[f64], factors: &[f64]) -> Result<f64, HgrError> {
    ensure_same_len(weights, factors)?;
    Ok(weights.iter().zip(factors).map(|(w, f)| w * f).sum())
}

/// Resizes `weights` to `dim`, padding with `1.0` or truncating.
pub fn reshape(weights: &mut Vec<f64>, dim: usize) {
    weights.resize(dim, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_adds_in_place() {
        let mut target = vec![1.0, 2.0];
        accumulate(&mut target, &[0.5, 0.5]).unwrap();
        assert_eq!(target, vec![1.5, 2.5]);
        accumulate(&mut target[1..], &[1.0]).unwrap();
        assert_eq!(target, vec![1.5, 3.5]);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut target = vec![1.0];
        let err = accumulate(&mut target, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, HgrError::Dimension(_)));
        assert_eq!(target, vec![1.0]);
        assert!(weighted_sum(&[1.0], &[]).is_err());
        assert!(max(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn weighted_sum_is_dot_product() {
        assert_eq!(weighted_sum(&[2.0, 3.0], &[0.5, 2.0]).unwrap(), 7.0);
    }

    #[test]
    fn reshape_pads_with_ones_and_truncates() {
        let mut weights = vec![3.0];
        reshape(&mut weights, 3);
        assert_eq!(weights, vec![3.0, 1.0, 1.0]);
        reshape(&mut weights, 1);
        assert_eq!(weights, vec![3.0]);
    }

    #[test]
    fn max_is_element_wise() {
        assert_eq!(max(&[1.0, 5.0], &[2.0, 4.0]).unwrap(), vec![2.0, 5.0]);
    }
}
