//! Synthetic point-source model for demos and tests
//!
//! Not an empirical attenuation relationship. Motion decays
//! logarithmically with epicentral distance from a configured source,
//! which is enough structure to exercise every field operation.

use crate::gmm::{GroundMotionModel, Rupture, StdDevType, Truncation};
use crate::site::{Location, Site};

/// Point-source model with log-distance attenuation.
///
/// Mean ln intensity at a site `d` km from the epicenter is
/// `level_at_source - decay * ln(1 + d)`. Standard deviations are fixed
/// per type; a type with no configured sigma is unsupported.
///
/// The evaluation context (rupture, site, selected std-dev type) is
/// mutable state, as the model contract requires. Derived reads with
/// missing context return NaN rather than a stale or invented value.
#[derive(Debug, Clone)]
pub struct PointSourceModel {
    epicenter: Location,
    level_at_source: f64,
    decay: f64,
    sigma_total: Option<f64>,
    sigma_inter: Option<f64>,
    sigma_intra: Option<f64>,
    truncation: Truncation,
    period_s: f64,
    rupture: Option<Rupture>,
    distance_km: Option<f64>,
    selected: StdDevType,
}

impl PointSourceModel {
    /// Model exposing only a total standard deviation.
    pub fn total_only(
        epicenter: Location,
        level_at_source: f64,
        decay: f64,
        sigma_total: f64,
    ) -> Self {
        Self {
            epicenter,
            level_at_source,
            decay,
            sigma_total: Some(sigma_total),
            sigma_inter: None,
            sigma_intra: None,
            truncation: Truncation::None,
            period_s: 0.0,
            rupture: None,
            distance_km: None,
            selected: StdDevType::Total,
        }
    }

    /// Model with split inter-event and intra-event standard deviations.
    /// The total is derived as the square root of the summed variances.
    pub fn split(
        epicenter: Location,
        level_at_source: f64,
        decay: f64,
        sigma_inter: f64,
        sigma_intra: f64,
    ) -> Self {
        Self {
            epicenter,
            level_at_source,
            decay,
            sigma_total: Some((sigma_inter * sigma_inter + sigma_intra * sigma_intra).sqrt()),
            sigma_inter: Some(sigma_inter),
            sigma_intra: Some(sigma_intra),
            truncation: Truncation::None,
            period_s: 0.0,
            rupture: None,
            distance_km: None,
            selected: StdDevType::Total,
        }
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Spectral period in seconds. Zero means a non-spectral measure.
    pub fn with_period(mut self, period_s: f64) -> Self {
        self.period_s = period_s;
        self
    }
}

impl GroundMotionModel for PointSourceModel {
    fn set_rupture(&mut self, rupture: Rupture) {
        self.rupture = Some(rupture);
    }

    fn set_site(&mut self, site: &Site) {
        self.distance_km = Some(site.location.horizontal_distance_km(&self.epicenter));
    }

    fn select_std_dev_type(&mut self, std_dev_type: StdDevType) {
        self.selected = std_dev_type;
    }

    fn mean(&self) -> f64 {
        match (self.rupture, self.distance_km) {
            (Some(_), Some(distance_km)) => {
                self.level_at_source - self.decay * (1.0 + distance_km).ln()
            }
            _ => f64::NAN,
        }
    }

    fn std_dev(&self) -> f64 {
        let sigma = match self.selected {
            StdDevType::Total => self.sigma_total,
            StdDevType::InterEvent => self.sigma_inter,
            StdDevType::IntraEvent => self.sigma_intra,
        };
        sigma.unwrap_or(f64::NAN)
    }

    fn supports(&self, std_dev_type: StdDevType) -> bool {
        match std_dev_type {
            StdDevType::Total => self.sigma_total.is_some(),
            StdDevType::InterEvent => self.sigma_inter.is_some(),
            StdDevType::IntraEvent => self.sigma_intra.is_some(),
        }
    }

    fn truncation(&self) -> Truncation {
        self.truncation
    }

    fn period(&self) -> f64 {
        self.period_s
    }
}
