//! Correlated residual generation via Cholesky factorization

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::error;

use crate::covariance::CovarianceMatrix;
use crate::error::{FieldError, Result};
use crate::gmm::Truncation;
use crate::sampler::truncated_gaussian;

/// Residual vector distributed as a zero-mean multivariate normal with
/// the given covariance.
///
/// Draws one standard Gaussian deviate per dimension, factors the
/// covariance as `L * L^T` and returns `L * g`. The deviates are drawn
/// before factorization, so the random stream advances by exactly
/// `covariance.dim()` draws whether or not factorization succeeds.
pub fn correlated_residuals<R>(
    covariance: &CovarianceMatrix,
    truncation: Truncation,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    R: Rng + ?Sized,
{
    let dim = covariance.dim();
    let mut deviates = DVector::zeros(dim);
    for i in 0..dim {
        deviates[i] = truncated_gaussian(1.0, truncation, rng)?;
    }

    let matrix = DMatrix::from_row_slice(dim, dim, covariance.as_slice());
    let factor = match matrix.cholesky() {
        Some(factor) => factor,
        None => {
            error!(dim, "covariance matrix failed Cholesky factorization");
            return Err(FieldError::NotPositiveDefinite { dim });
        }
    };
    let residuals = factor.l() * deviates;
    Ok(residuals.as_slice().to_vec())
}
