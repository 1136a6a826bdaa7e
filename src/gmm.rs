//! Ground-motion model capability contract
//!
//! The empirical equations live outside this crate; the calculator only
//! consumes the evaluation surface defined here.

use std::fmt;

use crate::site::Site;

/// Which standard deviation a model is asked to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdDevType {
    /// Total variability.
    Total,
    /// Event-to-event variability, shared by all sites in one realization.
    InterEvent,
    /// Site-to-site variability within one event.
    IntraEvent,
}

impl fmt::Display for StdDevType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdDevType::Total => write!(f, "total"),
            StdDevType::InterEvent => write!(f, "inter-event"),
            StdDevType::IntraEvent => write!(f, "intra-event"),
        }
    }
}

/// Bounds applied to sampled normal deviates, expressed in
/// standard-deviation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Truncation {
    /// Accept the first draw.
    None,
    /// Resample until `z <= level`; the lower tail stays unbounded.
    OneSided { level: f64 },
    /// Resample until `-level <= z <= level`.
    TwoSided { level: f64 },
}

/// Opaque identity of the earthquake source. The calculator passes it
/// through to the model and never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rupture(pub u64);

/// Evaluation surface of a ground-motion model.
///
/// A model instance carries mutable evaluation context: the current rupture,
/// the current site, and the selected standard-deviation type. The
/// calculator mutates that context on a single thread and re-sets whatever a
/// read depends on immediately before calling `mean` or `std_dev`; derived
/// values are never carried across a context switch. Callers that want
/// parallel field computation must give each worker its own model
/// instance; one instance is never shared.
pub trait GroundMotionModel {
    /// Set the rupture subsequent reads evaluate against.
    fn set_rupture(&mut self, rupture: Rupture);

    /// Set the site subsequent reads evaluate against.
    fn set_site(&mut self, site: &Site);

    /// Select which standard deviation `std_dev` reports. Callers check
    /// `supports` first; what a model reports for an unsupported selection
    /// is model-defined.
    fn select_std_dev_type(&mut self, kind: StdDevType);

    /// Mean intensity for the current rupture/site context, in the model's
    /// own units (typically natural-log intensity).
    fn mean(&self) -> f64;

    /// Standard deviation of the selected type for the current context. May
    /// legitimately vary with site-rupture distance or magnitude.
    fn std_dev(&self) -> f64;

    /// Whether the model can report the given standard-deviation type.
    fn supports(&self, kind: StdDevType) -> bool;

    /// Truncation applied to every deviate sampled against this model.
    fn truncation(&self) -> Truncation;

    /// Spectral period in seconds; 0.0 for non-spectral intensity measures.
    fn period(&self) -> f64;
}
