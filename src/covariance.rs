//! Intra-event covariance under the Jayaram & Baker (2009) correlation model
//!
//! Jayaram N. and Baker J.W. (2009), "Correlation model for spatially
//! distributed ground-motion intensities", Earthquake Engineering &
//! Structural Dynamics 38(15).

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::error::{FieldError, Result};
use crate::gmm::{GroundMotionModel, Rupture, StdDevType};
use crate::site::Site;

/// Dense symmetric matrix in row-major order.
///
/// Row/column indices follow the site order the matrix was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl CovarianceMatrix {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![0.0; dim * dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row-major backing slice, `dim * dim` long.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Index<(usize, usize)> for CovarianceMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.values[row * self.dim + col]
    }
}

impl IndexMut<(usize, usize)> for CovarianceMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.values[row * self.dim + col]
    }
}

/// Correlation range `b` in kilometers.
///
/// Below 1 s the range depends on whether the sites sit on clustered
/// Vs30 geology; at and above 1 s a single expression applies.
pub fn correlation_range(period_s: f64, vs30_cluster: bool) -> f64 {
    if period_s < 1.0 {
        if vs30_cluster {
            40.7 - 15.0 * period_s
        } else {
            8.5 + 17.2 * period_s
        }
    } else {
        22.0 + 3.7 * period_s
    }
}

/// Intra-event covariance matrix for `sites`, in site order.
///
/// Entry `(i, j)` is `sigma_i * sigma_j * exp(-3 d_ij / b)` where `d_ij`
/// is the horizontal separation and `b` the correlation range for the
/// model's period. Standard deviations are read with the relevant site
/// set, so site-dependent sigmas land on the right rows and columns.
pub fn intra_event_covariance<M>(
    model: &mut M,
    rupture: Rupture,
    sites: &[Site],
    vs30_cluster: bool,
) -> Result<CovarianceMatrix>
where
    M: GroundMotionModel + ?Sized,
{
    if !model.supports(StdDevType::IntraEvent) {
        return Err(FieldError::UnsupportedStdDevType(StdDevType::IntraEvent));
    }
    model.set_rupture(rupture);
    model.select_std_dev_type(StdDevType::IntraEvent);

    let range_km = correlation_range(model.period(), vs30_cluster);
    debug!(
        sites = sites.len(),
        range_km, vs30_cluster, "building intra-event covariance"
    );

    let mut matrix = CovarianceMatrix::zeros(sites.len());
    for (i, site_i) in sites.iter().enumerate() {
        model.set_site(site_i);
        let std_i = model.std_dev();
        for (j, site_j) in sites.iter().enumerate() {
            model.set_site(site_j);
            let std_j = model.std_dev();
            let distance_km = site_i.location.horizontal_distance_km(&site_j.location);
            matrix[(i, j)] = std_i * std_j * (-3.0 * distance_km / range_km).exp();
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gmm::Truncation;
    use crate::site::{Location, SiteId};
    use approx::assert_relative_eq;

    struct FlatSigmaModel {
        sigma: f64,
        period_s: f64,
        intra_supported: bool,
    }

    impl GroundMotionModel for FlatSigmaModel {
        fn set_rupture(&mut self, _rupture: Rupture) {}
        fn set_site(&mut self, _site: &Site) {}
        fn select_std_dev_type(&mut self, _std_dev_type: StdDevType) {}
        fn mean(&self) -> f64 {
            0.0
        }
        fn std_dev(&self) -> f64 {
            self.sigma
        }
        fn supports(&self, std_dev_type: StdDevType) -> bool {
            std_dev_type != StdDevType::IntraEvent || self.intra_supported
        }
        fn truncation(&self) -> Truncation {
            Truncation::None
        }
        fn period(&self) -> f64 {
            self.period_s
        }
    }

    /// Sigma is derived from the most recently set site.
    struct SiteScaledSigma {
        current: f64,
    }

    impl GroundMotionModel for SiteScaledSigma {
        fn set_rupture(&mut self, _rupture: Rupture) {}
        fn set_site(&mut self, site: &Site) {
            self.current = 0.1 * f64::from(site.id.0 + 1);
        }
        fn select_std_dev_type(&mut self, _std_dev_type: StdDevType) {}
        fn mean(&self) -> f64 {
            0.0
        }
        fn std_dev(&self) -> f64 {
            self.current
        }
        fn supports(&self, _std_dev_type: StdDevType) -> bool {
            true
        }
        fn truncation(&self) -> Truncation {
            Truncation::None
        }
        fn period(&self) -> f64 {
            0.0
        }
    }

    fn site(id: u32, lat_deg: f64, lon_deg: f64) -> Site {
        Site::new(SiteId(id), Location::new(lat_deg, lon_deg))
    }

    #[test]
    fn correlation_range_matches_published_coefficients() {
        assert_relative_eq!(correlation_range(0.5, false), 8.5 + 17.2 * 0.5);
        assert_relative_eq!(correlation_range(0.5, true), 40.7 - 15.0 * 0.5);
        assert_relative_eq!(correlation_range(2.0, false), 22.0 + 3.7 * 2.0);
        // At 1 s the cluster flag stops mattering.
        assert_relative_eq!(correlation_range(1.0, true), correlation_range(1.0, false));
    }

    #[test]
    fn diagonal_carries_the_intra_event_variance() {
        let mut model = FlatSigmaModel {
            sigma: 0.6,
            period_s: 0.0,
            intra_supported: true,
        };
        let sites = [site(0, 0.0, 0.0), site(1, 0.2, 0.0), site(2, 0.4, 0.0)];
        let cov = intra_event_covariance(&mut model, Rupture(1), &sites, false).unwrap();

        assert_eq!(cov.dim(), 3);
        for i in 0..3 {
            assert_relative_eq!(cov[(i, i)], 0.36, max_relative = 1e-12);
        }
    }

    #[test]
    fn covariance_decays_with_separation() {
        let mut model = FlatSigmaModel {
            sigma: 1.0,
            period_s: 0.0,
            intra_supported: true,
        };
        let sites = [site(0, 0.0, 0.0), site(1, 0.1, 0.0), site(2, 0.3, 0.0)];
        let cov = intra_event_covariance(&mut model, Rupture(1), &sites, false).unwrap();

        assert!(cov[(0, 1)] > cov[(0, 2)]);
        assert!(cov[(0, 2)] > 0.0);
    }

    #[test]
    fn matrix_is_symmetric() {
        let mut model = SiteScaledSigma { current: f64::NAN };
        let sites = [site(0, 0.0, 0.0), site(1, 0.15, 0.1), site(2, 0.3, -0.2)];
        let cov = intra_event_covariance(&mut model, Rupture(7), &sites, false).unwrap();

        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(cov[(i, j)], cov[(j, i)], max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn sigma_is_read_under_the_evaluated_site() {
        let mut model = SiteScaledSigma { current: f64::NAN };
        let sites = [site(0, 0.0, 0.0), site(1, 0.0, 0.0)];
        let cov = intra_event_covariance(&mut model, Rupture(7), &sites, false).unwrap();

        // Coincident sites, so only the sigmas differ: 0.1 and 0.2.
        assert_relative_eq!(cov[(0, 0)], 0.01, max_relative = 1e-12);
        assert_relative_eq!(cov[(1, 1)], 0.04, max_relative = 1e-12);
        assert_relative_eq!(cov[(0, 1)], 0.02, max_relative = 1e-12);
    }

    #[test]
    fn cluster_flag_widens_short_period_correlation() {
        let sites = [site(0, 0.0, 0.0), site(1, 0.2, 0.0)];
        let mut model = FlatSigmaModel {
            sigma: 1.0,
            period_s: 0.0,
            intra_supported: true,
        };
        let plain = intra_event_covariance(&mut model, Rupture(1), &sites, false).unwrap();
        let clustered = intra_event_covariance(&mut model, Rupture(1), &sites, true).unwrap();

        assert!(clustered[(0, 1)] > plain[(0, 1)]);
    }

    #[test]
    fn model_without_intra_event_support_is_rejected() {
        let mut model = FlatSigmaModel {
            sigma: 1.0,
            period_s: 0.0,
            intra_supported: false,
        };
        let sites = [site(0, 0.0, 0.0)];
        let err = intra_event_covariance(&mut model, Rupture(1), &sites, false).unwrap_err();
        assert_eq!(err, FieldError::UnsupportedStdDevType(StdDevType::IntraEvent));
    }
}
