//! shakefield - stochastic earthquake ground-motion fields
//!
//! Computes ground-motion intensity over a set of sites for a single
//! rupture and ground-motion model: the deterministic mean field, a
//! stochastic field with independent residuals, and a stochastic field
//! whose intra-event residuals follow the Jayaram & Baker (2009)
//! spatial correlation model via Cholesky factorization.

pub mod calculator;
pub mod correlated;
pub mod covariance;
pub mod error;
pub mod field;
pub mod gmm;
pub mod sampler;
pub mod site;
pub mod synthetic;

// Re-export main types
pub use calculator::{
    correlated_ground_motion_field, mean_ground_motion_field, stochastic_ground_motion_field,
    CorrelatedFieldOptions,
};
pub use correlated::correlated_residuals;
pub use covariance::{correlation_range, intra_event_covariance, CovarianceMatrix};
pub use error::{FieldError, Result};
pub use field::GroundMotionField;
pub use gmm::{GroundMotionModel, Rupture, StdDevType, Truncation};
pub use sampler::{truncated_gaussian, MAX_REJECTION_DRAWS};
pub use site::{Location, Site, SiteId};
pub use synthetic::PointSourceModel;
