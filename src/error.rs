//! Error taxonomy for field calculations

use thiserror::Error;

use crate::gmm::StdDevType;
use crate::site::SiteId;

/// Result type for field calculations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Everything that can go wrong while computing a ground-motion field.
///
/// All variants surface synchronously to the caller of the operation that
/// triggered them; no partial field is ever returned alongside an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("site list must contain at least one site")]
    EmptySiteList,

    #[error("duplicate site identity {0}")]
    DuplicateSite(SiteId),

    #[error("ground-motion model does not provide {0} standard deviation")]
    UnsupportedStdDevType(StdDevType),

    #[error("no deviate accepted after {draws} draws (truncation level {level})")]
    SamplingExhausted { draws: usize, level: f64 },

    #[error("covariance matrix ({dim}x{dim}) is not positive definite")]
    NotPositiveDefinite { dim: usize },
}
