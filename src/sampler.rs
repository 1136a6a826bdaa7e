//! Truncated Gaussian deviate sampling

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{FieldError, Result};
use crate::gmm::Truncation;

/// Draw budget for rejection sampling. Two-sided truncation at level 3
/// rejects about 0.27% of draws, so any sane policy stays far below this;
/// a window that excludes all probable draws fails instead of spinning.
pub const MAX_REJECTION_DRAWS: usize = 10_000;

/// Zero-mean Gaussian deviate scaled by `std_dev`, truncated per policy.
///
/// The truncation window applies to the standard deviate before scaling,
/// so levels are expressed in standard-deviation units.
pub fn truncated_gaussian<R: Rng + ?Sized>(
    std_dev: f64,
    truncation: Truncation,
    rng: &mut R,
) -> Result<f64> {
    match truncation {
        Truncation::None => {
            let z: f64 = StandardNormal.sample(rng);
            Ok(z * std_dev)
        }
        Truncation::TwoSided { level } => {
            for _ in 0..MAX_REJECTION_DRAWS {
                let z: f64 = StandardNormal.sample(rng);
                if (-level..=level).contains(&z) {
                    return Ok(z * std_dev);
                }
            }
            Err(FieldError::SamplingExhausted {
                draws: MAX_REJECTION_DRAWS,
                level,
            })
        }
        Truncation::OneSided { level } => {
            for _ in 0..MAX_REJECTION_DRAWS {
                let z: f64 = StandardNormal.sample(rng);
                if z <= level {
                    return Ok(z * std_dev);
                }
            }
            Err(FieldError::SamplingExhausted {
                draws: MAX_REJECTION_DRAWS,
                level,
            })
        }
    }
}
